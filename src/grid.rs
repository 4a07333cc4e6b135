//! Grid Module
//!
//! 不揃いな行やスパースなセルデータから、稠密な矩形グリッドへの変換を提供するモジュール。
//! APIのレスポンスは末尾の空セル・空行を省略するため、呼び出し側が必要とする
//! 均一な矩形にここで整形します。

use crate::address::a1_to_rowcol;
use crate::api::TableDirection;
use crate::error::SheetGridError;
use crate::types::{CellRect, CellUpdate};
use crate::wire::GridRange;

/// 行ごとに長さの異なるデータを空値で埋めて矩形にする
///
/// # 引数
///
/// * `rows` - 入力の行データ
/// * `target_rows` - 最小の行数（`None`の場合は入力の行数）
/// * `target_cols` - 最小の列数（`None`の場合は最長の行の長さ）
/// * `blank` - 埋める値
///
/// # 戻り値
///
/// すべての行が同じ長さのグリッド。列数は`target_cols`と最長の行のうち大きい方です。
/// `target_cols`・`target_rows`は下限であり、データを切り詰めることはありません。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::fill_gaps;
///
/// let grid = fill_gaps(vec![vec![1, 2, 3]], Some(2), Some(4), 0);
/// assert_eq!(grid, vec![vec![1, 2, 3, 0], vec![0, 0, 0, 0]]);
/// ```
pub fn fill_gaps<T: Clone>(
    mut rows: Vec<Vec<T>>,
    target_rows: Option<usize>,
    target_cols: Option<usize>,
    blank: T,
) -> Vec<Vec<T>> {
    // 1. 列数の決定（指定値は下限として扱う）
    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = target_cols.unwrap_or(0).max(longest);

    // 2. 不足している行を追加
    let height = target_rows.unwrap_or(0).max(rows.len());
    rows.resize_with(height, Vec::new);

    // 3. 各行を右側から埋める
    for row in &mut rows {
        if row.len() < width {
            row.resize(width, blank.clone());
        }
    }

    rows
}

/// スパースなセルのリストを外接矩形のグリッドに変換する
///
/// `CellRect::bounding`で外接矩形を求め、リストに含まれない位置
/// （内部の空きも含む）は`blank`で埋めます。同じ座標が複数回現れた場合は
/// 後のものが優先されます。
///
/// # 戻り値
///
/// * `Ok(Vec<Vec<T>>)` - `(max_row - min_row + 1)`行 × `(max_col - min_col + 1)`列のグリッド
///   （空のリストの場合は空のグリッド）
/// * `Err(SheetGridError::InvalidBound)` - 0の座標を含む場合
pub fn cell_list_to_rect<T: Clone>(
    cells: &[CellUpdate<T>],
    blank: T,
) -> Result<Vec<Vec<T>>, SheetGridError> {
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    // 1. グリッドサイズの決定
    let rect = CellRect::bounding(cells).ok_or_else(|| {
        SheetGridError::InvalidBound("cell coordinates must be 1-based".to_string())
    })?;
    let (rows, cols) = rect.size();
    let origin = rect.start;

    // 2. 空のグリッドを初期化して値を配置
    let mut grid = vec![vec![blank; cols as usize]; rows as usize];
    for cell in cells {
        grid[(cell.row - origin.row) as usize][(cell.col - origin.col) as usize] =
            cell.value.clone();
    }

    Ok(grid)
}

/// 結合セル範囲内のすべてのセルに左上セルの値を複製する
///
/// # 引数
///
/// * `values` - シートから取得した値のグリッド
/// * `merges` - シートのメタデータに含まれる結合範囲
/// * `start_row_index` - `values`の先頭行のシート上のインデックス（0始まり）
/// * `start_col_index` - `values`の先頭列のシート上のインデックス（0始まり）
///
/// 左上セルが`values`の外にある結合範囲と、境界が欠けている結合範囲は無視します。
/// `values`の外にはみ出す部分は切り捨てます。
pub fn combined_merge_values<T: Clone>(
    values: &[Vec<T>],
    merges: &[GridRange],
    start_row_index: u32,
    start_col_index: u32,
) -> Vec<Vec<T>> {
    let mut combined = values.to_vec();

    for merge in merges {
        let Some((row_start, row_end, col_start, col_end)) = merge.bounds() else {
            continue;
        };
        // シート上の座標を`values`内の座標へ
        if row_start < start_row_index || col_start < start_col_index {
            continue;
        }
        let row_start = (row_start - start_row_index) as usize;
        let row_end = row_end.saturating_sub(start_row_index) as usize;
        let col_start = (col_start - start_col_index) as usize;
        let col_end = col_end.saturating_sub(start_col_index) as usize;

        let Some(top_left) = values.get(row_start).and_then(|row| row.get(col_start)) else {
            continue;
        };

        for row in combined.iter_mut().take(row_end).skip(row_start) {
            let end = col_end.min(row.len());
            for cell in row.iter_mut().take(end).skip(col_start) {
                *cell = top_left.clone();
            }
        }
    }

    combined
}

/// 開始セルから空でないセルが続く範囲を切り出す
///
/// 右方向は開始行で、下方向は開始列で、最初の空セル（空文字列）の手前までを
/// 範囲とします。`TableDirection::Table`は表の内部を確認しないため、
/// 結果の内部に空セルが含まれる場合があります。
///
/// # 戻り値
///
/// * `Ok(Vec<Vec<T>>)` - 切り出した表（開始セルが空の場合は空）
/// * `Err(SheetGridError::InvalidInput)` - 開始セルが`values`の外にある場合
pub fn find_table<T: AsRef<str> + Clone>(
    values: &[Vec<T>],
    start_label: &str,
    direction: TableDirection,
) -> Result<Vec<Vec<T>>, SheetGridError> {
    let start = a1_to_rowcol(start_label)?;
    let row = (start.row - 1) as usize;
    let col = (start.col - 1) as usize;

    if row >= values.len() {
        return Err(SheetGridError::InvalidInput(format!(
            "start cell '{}' is outside the given values ({} rows)",
            start_label,
            values.len()
        )));
    }
    if col >= values[row].len() {
        return Err(SheetGridError::InvalidInput(format!(
            "start cell '{}' is outside the given values ({} columns)",
            start_label,
            values[row].len()
        )));
    }

    let is_blank = |cell: &T| cell.as_ref().is_empty();

    // 排他的な右端・下端を求める
    let right_end = match direction {
        TableDirection::Down => col + 1,
        TableDirection::Right | TableDirection::Table => values[row][col..]
            .iter()
            .position(is_blank)
            .map_or(values[row].len(), |offset| col + offset),
    };
    let bottom_end = match direction {
        TableDirection::Right => row + 1,
        TableDirection::Down | TableDirection::Table => values[row..]
            .iter()
            .position(|cells| cells.get(col).map_or(true, is_blank))
            .map_or(values.len(), |offset| row + offset),
    };

    if right_end == col || bottom_end == row {
        return Ok(Vec::new());
    }

    let table = values[row..bottom_end]
        .iter()
        .map(|cells| {
            let end = right_end.min(cells.len());
            cells[col.min(end)..end].to_vec()
        })
        .collect();

    Ok(table)
}
