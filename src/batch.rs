//! Batch Module
//!
//! 大量のセル更新を、サーバーが受け付けるリクエストあたりの最大セル数以下の
//! バッチに分割するモジュール。

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::address::absolute_range_name;
use crate::error::SheetGridError;
use crate::types::{CellAddress, CellRect, CellUpdate};
use crate::wire::ValueRange;

/// 1回の書き込みリクエストで更新できるセル数の上限
pub const DEFAULT_MAX_CELLS_PER_BATCH: usize = 40_000;

/// 更新リストを連続したバッチに分割する
///
/// k番目のバッチは`[k * max, min((k + 1) * max, N))`を覆います。
/// 順序は保持され、重複も欠落もありません。行の境界は考慮しないため、
/// 1行のセルが2つのバッチにまたがる場合があります。
///
/// # 戻り値
///
/// * `Ok(Vec<&[T]>)` - `ceil(N / max)`個のバッチ
/// * `Err(SheetGridError::InvalidBound)` - `max`が0の場合
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::partition_updates;
///
/// let updates: Vec<u32> = (0..5).collect();
/// let batches = partition_updates(&updates, 2).unwrap();
///
/// let expected: Vec<&[u32]> = vec![&[0, 1], &[2, 3], &[4]];
/// assert_eq!(batches, expected);
/// ```
pub fn partition_updates<T>(updates: &[T], max: usize) -> Result<Vec<&[T]>, SheetGridError> {
    if max == 0 {
        return Err(SheetGridError::InvalidBound(
            "maximum batch size must be >= 1".to_string(),
        ));
    }
    Ok(updates.chunks(max).collect())
}

/// 更新リストをバッチごとの`ValueRange`のリストに変換する
///
/// 各バッチ内の更新を座標順に並べ、同じ行で列が連続するセルを1つの
/// `ValueRange`にまとめます。書き込むのは更新されたセルだけなので、
/// 1バッチに含まれる`values`のセル数は`max`以下になります。
/// 同じ座標への更新がバッチ内で重複した場合は後のものが優先されます。
/// バッチは並列に変換し、分割した順序で返します。
pub(crate) fn plan_value_updates<T>(
    sheet_title: &str,
    updates: &[CellUpdate<T>],
    max: usize,
) -> Result<Vec<Vec<ValueRange<T>>>, SheetGridError>
where
    T: Clone + Send + Sync,
{
    let batches = partition_updates(updates, max)?;
    if batches.is_empty() {
        log::debug!("no cell updates to send");
        return Ok(Vec::new());
    }
    log::debug!(
        "{} cell updates to send, will send {} batches of {} cells maximum",
        updates.len(),
        batches.len(),
        max
    );

    batches
        .par_iter()
        .enumerate()
        .map(|(batch_idx, batch)| {
            let ranges = row_segments(sheet_title, batch)?;
            log::trace!(
                "batch {} writes {} cells in {} ranges",
                batch_idx + 1,
                batch.len(),
                ranges.len()
            );
            Ok(ranges)
        })
        .collect()
}

/// 1バッチ分の更新を行ごとの連続区間に分ける（内部ヘルパー）
fn row_segments<T: Clone>(
    sheet_title: &str,
    batch: &[CellUpdate<T>],
) -> Result<Vec<ValueRange<T>>, SheetGridError> {
    // 座標順（行優先）に並べ、重複は後の更新で置き換える
    let mut cells: BTreeMap<CellAddress, &T> = BTreeMap::new();
    for update in batch {
        cells.insert(CellAddress::new(update.row, update.col)?, &update.value);
    }

    let mut ranges = Vec::new();
    let mut segment: Option<(CellAddress, CellAddress, Vec<T>)> = None;

    for (address, value) in cells {
        // 同じ行の直後の列なら現在の区間を延長する
        if let Some((_, end, values)) = segment.as_mut() {
            if end.row == address.row && address.col - end.col == 1 {
                *end = address;
                values.push(value.clone());
                continue;
            }
        }
        if let Some((start, end, values)) = segment.replace((address, address, vec![value.clone()]))
        {
            ranges.push(segment_range(sheet_title, start, end, values));
        }
    }
    if let Some((start, end, values)) = segment {
        ranges.push(segment_range(sheet_title, start, end, values));
    }

    Ok(ranges)
}

fn segment_range<T>(
    sheet_title: &str,
    start: CellAddress,
    end: CellAddress,
    values: Vec<T>,
) -> ValueRange<T> {
    let rect = CellRect::new(start, end);
    ValueRange::rows(
        absolute_range_name(sheet_title, Some(&rect.to_a1())),
        vec![values],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_updates_coverage() {
        let updates: Vec<usize> = (0..10).collect();

        for max in 1..=12 {
            let batches = partition_updates(&updates, max).unwrap();

            assert_eq!(batches.len(), updates.len().div_ceil(max));
            assert!(batches.iter().all(|batch| batch.len() <= max));
            assert_eq!(batches.concat(), updates);
        }
    }

    #[test]
    fn test_partition_updates_empty() {
        let updates: Vec<u8> = Vec::new();
        assert!(partition_updates(&updates, 3).unwrap().is_empty());
    }

    #[test]
    fn test_partition_updates_zero_max() {
        assert!(matches!(
            partition_updates(&[1, 2, 3], 0),
            Err(SheetGridError::InvalidBound(_))
        ));
    }

    #[test]
    fn test_plan_value_updates_row_segments() {
        let updates = vec![
            CellUpdate::new(1, 3, "c"),
            CellUpdate::new(1, 1, "a"),
            CellUpdate::new(1, 2, "b"),
            CellUpdate::new(2, 2, "e"),
            CellUpdate::new(10, 1, "f"),
        ];
        let plan = plan_value_updates("Sheet1", &updates, 4).unwrap();

        assert_eq!(plan.len(), 2);
        let ranges: Vec<&str> = plan[0].iter().map(|r| r.range.as_str()).collect();
        assert_eq!(ranges, vec!["'Sheet1'!A1:C1", "'Sheet1'!B2:B2"]);
        assert_eq!(plan[0][0].values, vec![vec!["a", "b", "c"]]);
        assert_eq!(plan[1].len(), 1);
        assert_eq!(plan[1][0].range, "'Sheet1'!A10:A10");
    }

    #[test]
    fn test_plan_value_updates_sparse_stays_within_max() {
        // 離れた2セルでも外接矩形ではなくセル単位で書き込む
        let updates = vec![
            CellUpdate::new(100, 100, 2),
            CellUpdate::new(1, 1, 1),
            CellUpdate::new(1_048_576, 16_384, 3),
        ];
        let plan = plan_value_updates("S", &updates, 10).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(payload_cells(&plan[0]), 3);
        assert_eq!(plan[0][2].range, "'S'!XFD1048576:XFD1048576");
    }

    #[test]
    fn test_plan_value_updates_later_duplicate_wins() {
        let updates = vec![
            CellUpdate::new(2, 2, "old"),
            CellUpdate::new(2, 3, "x"),
            CellUpdate::new(2, 2, "new"),
        ];
        let plan = plan_value_updates("S", &updates, 10).unwrap();

        assert_eq!(plan[0].len(), 1);
        assert_eq!(plan[0][0].values, vec![vec!["new", "x"]]);
    }

    #[test]
    fn test_plan_value_updates_rejects_zero_coordinates() {
        let updates = vec![CellUpdate::new(0, 1, 1)];
        assert!(matches!(
            plan_value_updates("S", &updates, 10),
            Err(SheetGridError::InvalidBound(_))
        ));
    }

    fn payload_cells<T>(ranges: &[ValueRange<T>]) -> usize {
        ranges
            .iter()
            .flat_map(|range| range.values.iter())
            .map(Vec::len)
            .sum()
    }

    // プロパティベーステスト
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_partition_concat_reproduces_input(
                updates in prop::collection::vec(any::<u16>(), 0..500),
                max in 1usize..64,
            ) {
                let batches = partition_updates(&updates, max).unwrap();

                prop_assert_eq!(batches.len(), updates.len().div_ceil(max));
                prop_assert!(batches
                    .iter()
                    .all(|batch| !batch.is_empty() && batch.len() <= max));
                prop_assert_eq!(&batches.concat(), &updates);
            }

            // 順不同・スパースな更新でも各バッチのセル数がmax以下で、
            // 順に適用すると最後の更新値が残ること
            #[test]
            fn test_plan_respects_max_and_keeps_last_value(
                cells in prop::collection::vec((1u32..2_000, 1u32..300, any::<u8>()), 0..300),
                max in 1usize..50,
            ) {
                let updates: Vec<CellUpdate<u8>> = cells
                    .iter()
                    .map(|&(row, col, value)| CellUpdate::new(row, col, value))
                    .collect();
                let plan = plan_value_updates("S", &updates, max).unwrap();

                prop_assert_eq!(plan.len(), updates.len().div_ceil(max));

                let mut written = BTreeMap::new();
                for batch in &plan {
                    prop_assert!(payload_cells(batch) <= max);
                    for range in batch {
                        let a1 = range.range.trim_start_matches("'S'!");
                        let (start, _) = a1.split_once(':').unwrap();
                        let start = crate::address::a1_to_rowcol(start).unwrap();
                        prop_assert_eq!(range.values.len(), 1);
                        for (offset, value) in range.values[0].iter().enumerate() {
                            written.insert((start.row, start.col + offset as u32), *value);
                        }
                    }
                }

                let mut expected = BTreeMap::new();
                for update in &updates {
                    expected.insert((update.row, update.col), update.value);
                }
                prop_assert_eq!(written, expected);
            }
        }
    }
}
