//! Builder Module
//!
//! Fluent Builder APIを提供し、`GridShaper`と`RangeRequest`を段階的に構築する。

use serde::Serialize;

use crate::address::{
    a1_range_to_grid_range, absolute_range_name, column_letters, grid_range_from_bounds,
    order_bounds,
};
use crate::api::ValueInputOption;
use crate::batch::{partition_updates, plan_value_updates, DEFAULT_MAX_CELLS_PER_BATCH};
use crate::error::SheetGridError;
use crate::grid;
use crate::types::CellUpdate;
use crate::wire::{BatchUpdateValuesRequest, GridRange, ValueRange};

/// グリッド整形の設定を保持する内部構造体
#[derive(Debug, Clone)]
struct ShaperConfig<T> {
    /// 穴埋めに使う空白値
    blank: T,

    /// 1バッチあたりの最大セル数
    max_batch_cells: usize,

    /// 書き込み時の値の解釈方法
    value_input_option: ValueInputOption,
}

/// Fluent Builder APIを提供する構造体
///
/// `GridShaper`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::{GridShaperBuilder, ValueInputOption};
///
/// # fn main() -> Result<(), sheetgrid::SheetGridError> {
/// let shaper = GridShaperBuilder::<String>::new()
///     .with_max_batch_cells(1000)
///     .with_value_input_option(ValueInputOption::UserEntered)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GridShaperBuilder<T> {
    /// 内部設定（構築中）
    config: ShaperConfig<T>,
}

impl<T: Default> Default for GridShaperBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> GridShaperBuilder<T> {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 空白値: `T::default()`（`String`の場合は空文字列）
    /// - 最大セル数: `DEFAULT_MAX_CELLS_PER_BATCH`
    /// - 値の解釈: `ValueInputOption::Raw`
    pub fn new() -> Self {
        Self {
            config: ShaperConfig {
                blank: T::default(),
                max_batch_cells: DEFAULT_MAX_CELLS_PER_BATCH,
                value_input_option: ValueInputOption::default(),
            },
        }
    }
}

impl<T> GridShaperBuilder<T> {
    /// 穴埋めに使う空白値を指定する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgrid::GridShaperBuilder;
    ///
    /// let builder = GridShaperBuilder::new().with_blank_value("-".to_string());
    /// ```
    pub fn with_blank_value(mut self, blank: T) -> Self {
        self.config.blank = blank;
        self
    }

    /// 1バッチあたりの最大セル数を指定する
    ///
    /// 0は`build()`でエラーになります。
    pub fn with_max_batch_cells(mut self, max: usize) -> Self {
        self.config.max_batch_cells = max;
        self
    }

    /// 書き込み時の値の解釈方法を指定する
    pub fn with_value_input_option(mut self, option: ValueInputOption) -> Self {
        self.config.value_input_option = option;
        self
    }

    /// 設定を検証して`GridShaper`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(GridShaper<T>)` - 設定が有効な場合
    /// * `Err(SheetGridError::Config)` - 最大セル数が0の場合
    pub fn build(self) -> Result<GridShaper<T>, SheetGridError> {
        if self.config.max_batch_cells == 0 {
            return Err(SheetGridError::Config(
                "max batch cells must be >= 1".to_string(),
            ));
        }

        Ok(GridShaper {
            config: self.config,
        })
    }
}

/// グリッド整形と書き込み計画のファサード
///
/// `GridShaperBuilder`で構築された設定（空白値、バッチサイズ）に基づいて、
/// 不揃いな行の矩形化やセル更新のバッチ分割を行います。
#[derive(Debug, Clone)]
pub struct GridShaper<T> {
    config: ShaperConfig<T>,
}

impl<T: Clone + Send + Sync> GridShaper<T> {
    /// 穴埋めに使う空白値
    pub fn blank(&self) -> &T {
        &self.config.blank
    }

    /// 1バッチあたりの最大セル数
    pub fn max_batch_cells(&self) -> usize {
        self.config.max_batch_cells
    }

    /// 不揃いな行を空白値で矩形に揃える
    ///
    /// 詳細は[`fill_gaps`](crate::fill_gaps)を参照。
    pub fn fill_gaps(
        &self,
        rows: Vec<Vec<T>>,
        target_rows: Option<usize>,
        target_cols: Option<usize>,
    ) -> Vec<Vec<T>> {
        grid::fill_gaps(rows, target_rows, target_cols, self.config.blank.clone())
    }

    /// セル更新のリストを外接矩形に展開する
    pub fn cell_list_to_rect(
        &self,
        cells: &[CellUpdate<T>],
    ) -> Result<Vec<Vec<T>>, SheetGridError> {
        grid::cell_list_to_rect(cells, self.config.blank.clone())
    }

    /// セル更新のリストを最大セル数ごとのバッチに分割する
    pub fn partition<'a>(
        &self,
        updates: &'a [CellUpdate<T>],
    ) -> Result<Vec<&'a [CellUpdate<T>]>, SheetGridError> {
        partition_updates(updates, self.config.max_batch_cells)
    }

    /// セル更新をバッチごとの`ValueRange`のリストに変換する
    ///
    /// 外側のリストが1回の書き込みリクエストに対応し、各リクエストで
    /// 書き込むセル数は最大セル数以下になります。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgrid::{CellUpdate, GridShaperBuilder};
    ///
    /// # fn main() -> Result<(), sheetgrid::SheetGridError> {
    /// let shaper = GridShaperBuilder::<i64>::new().with_max_batch_cells(3).build()?;
    /// let updates = vec![
    ///     CellUpdate::new(1, 2, 20),
    ///     CellUpdate::new(1, 1, 10),
    ///     CellUpdate::new(500, 40, 30),
    ///     CellUpdate::new(3, 1, 40),
    /// ];
    ///
    /// let plan = shaper.plan_updates("Sheet1", &updates)?;
    /// assert_eq!(plan.len(), 2);
    /// assert_eq!(plan[0][0].range, "'Sheet1'!A1:B1");
    /// assert_eq!(plan[0][0].values, vec![vec![10, 20]]);
    /// assert_eq!(plan[0][1].range, "'Sheet1'!AN500:AN500");
    /// assert_eq!(plan[1][0].range, "'Sheet1'!A3:A3");
    /// # Ok(())
    /// # }
    /// ```
    pub fn plan_updates(
        &self,
        sheet_title: &str,
        updates: &[CellUpdate<T>],
    ) -> Result<Vec<Vec<ValueRange<T>>>, SheetGridError> {
        plan_value_updates(sheet_title, updates, self.config.max_batch_cells)
    }

    /// セル更新から一括書き込みリクエストのボディをバッチごとに生成する
    pub fn batch_update_requests(
        &self,
        sheet_title: &str,
        updates: &[CellUpdate<T>],
    ) -> Result<Vec<BatchUpdateValuesRequest<T>>, SheetGridError>
    where
        T: Serialize,
    {
        let requests = self
            .plan_updates(sheet_title, updates)?
            .into_iter()
            .map(|data| BatchUpdateValuesRequest::new(self.config.value_input_option, data))
            .collect();

        Ok(requests)
    }
}

/// 範囲の指定方法
///
/// A1記法のラベル、または1始まりの数値境界のいずれかです。
/// 数値境界の`None`はその方向に境界がないことを表します。
/// `first_*`が`None`なら開始側、`last_*`が`None`なら終了側が無制限です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSpec {
    /// "A1:B10"、"A:B"、"5:5"などのラベル
    Label(String),

    /// 数値境界（1始まり）
    Bounds {
        first_row: Option<u32>,
        first_col: Option<u32>,
        last_row: Option<u32>,
        last_col: Option<u32>,
    },
}

impl RangeSpec {
    /// A1記法の文字列に変換する
    ///
    /// 数値境界は両端が指定された軸のみ並べ替えてから出力します。
    /// 開始側が`None`の軸は1行目（A列）からの範囲として出力します。
    /// 境界がすべて`None`の場合はシート全体を表す空文字列になります。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - "A1:B2"、"A:B"、"5:9"、"A5:B"など
    /// * `Err(SheetGridError::InvalidBound)` - 境界が0の場合、またはA1記法で表現できない場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgrid::RangeSpec;
    ///
    /// let spec = RangeSpec::Bounds {
    ///     first_row: Some(2),
    ///     first_col: Some(2),
    ///     last_row: Some(1),
    ///     last_col: Some(1),
    /// };
    /// assert_eq!(spec.to_a1().unwrap(), "A1:B2");
    /// ```
    pub fn to_a1(&self) -> Result<String, SheetGridError> {
        let (first_row, first_col, last_row, last_col) = match self {
            RangeSpec::Label(label) => return Ok(label.clone()),
            RangeSpec::Bounds {
                first_row,
                first_col,
                last_row,
                last_col,
            } => (*first_row, *first_col, *last_row, *last_col),
        };

        if [first_row, first_col, last_row, last_col].contains(&Some(0)) {
            return Err(SheetGridError::InvalidBound(
                "range bounds must be 1-based".to_string(),
            ));
        }

        // 開始側が無制限の軸はA1記法では1行目（A列）から始まる
        let (first_row, last_row) = order_bounds(first_row, last_row);
        let (first_col, last_col) = order_bounds(first_col, last_col);
        let first_row = first_row.or(last_row.map(|_| 1));
        let first_col = first_col.or(last_col.map(|_| 1));

        let start = endpoint_label(first_row, first_col);
        let end = endpoint_label(last_row, last_col);

        match (start.is_empty(), end.is_empty()) {
            (true, _) => Ok(String::new()),
            (false, false) => Ok(format!("{}:{}", start, end)),
            (false, true) => Err(SheetGridError::InvalidBound(format!(
                "range starting at '{}' with no end cannot be written in A1 notation",
                start
            ))),
        }
    }

    /// `GridRange`に変換する
    pub fn to_grid_range(&self, sheet_id: Option<u32>) -> Result<GridRange, SheetGridError> {
        match self {
            RangeSpec::Label(label) => a1_range_to_grid_range(label, sheet_id),
            RangeSpec::Bounds {
                first_row,
                first_col,
                last_row,
                last_col,
            } => grid_range_from_bounds(
                order_bounds(*first_row, *last_row),
                order_bounds(*first_col, *last_col),
                sheet_id,
            ),
        }
    }
}

/// 範囲の片側をA1記法で出力（内部ヘルパー）
fn endpoint_label(row: Option<u32>, col: Option<u32>) -> String {
    let mut label = col.map(column_letters).unwrap_or_default();
    if let Some(row) = row {
        label.push_str(&row.to_string());
    }
    label
}

/// `RangeRequest`を段階的に構築するビルダー
///
/// ラベルと数値境界はどちらか一方のみ指定できます。
/// どちらも指定しない場合はシート全体を表します。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::RangeRequestBuilder;
///
/// # fn main() -> Result<(), sheetgrid::SheetGridError> {
/// let request = RangeRequestBuilder::new()
///     .with_bounds(Some(1), Some(1), Some(3), Some(2))
///     .with_sheet_id(7)
///     .build()?;
///
/// assert_eq!(request.a1()?, "A1:B3");
/// assert_eq!(request.absolute_name("Data")?, "'Data'!A1:B3");
/// assert_eq!(request.grid_range()?.end_row_index, Some(3));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeRequestBuilder {
    label: Option<String>,
    bounds: Option<RangeSpec>,
    sheet_id: Option<u32>,
}

impl RangeRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A1記法のラベルで範囲を指定する
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 1始まりの数値境界で範囲を指定する
    pub fn with_bounds(
        mut self,
        first_row: Option<u32>,
        first_col: Option<u32>,
        last_row: Option<u32>,
        last_col: Option<u32>,
    ) -> Self {
        self.bounds = Some(RangeSpec::Bounds {
            first_row,
            first_col,
            last_row,
            last_col,
        });
        self
    }

    /// 対象シートのIDを指定する
    pub fn with_sheet_id(mut self, sheet_id: u32) -> Self {
        self.sheet_id = Some(sheet_id);
        self
    }

    /// 指定を検証して`RangeRequest`を生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(RangeRequest)` - 指定が有効な場合
    /// * `Err(SheetGridError::InconsistentGridRequest)` - ラベルと数値境界の両方が指定された場合
    /// * `Err(SheetGridError::Config)` - ラベルが空文字列の場合
    /// * `Err(SheetGridError::InvalidBound)` - 数値境界が0の場合
    pub fn build(self) -> Result<RangeRequest, SheetGridError> {
        let spec = match (self.label, self.bounds) {
            (Some(label), Some(_)) => {
                return Err(SheetGridError::InconsistentGridRequest(format!(
                    "both a range label ('{}') and numeric bounds were given",
                    label
                )));
            }
            (Some(label), None) if label.is_empty() => {
                return Err(SheetGridError::Config("range label is empty".to_string()));
            }
            (Some(label), None) => Some(RangeSpec::Label(label)),
            (None, bounds) => bounds,
        };

        if let Some(bounds @ RangeSpec::Bounds { .. }) = &spec {
            bounds.to_grid_range(self.sheet_id)?;
        }

        Ok(RangeRequest {
            spec,
            sheet_id: self.sheet_id,
        })
    }
}

/// 構築済みの範囲リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    /// `None`の場合はシート全体
    spec: Option<RangeSpec>,
    sheet_id: Option<u32>,
}

impl RangeRequest {
    pub fn spec(&self) -> Option<&RangeSpec> {
        self.spec.as_ref()
    }

    pub fn sheet_id(&self) -> Option<u32> {
        self.sheet_id
    }

    /// A1記法のラベル（シート全体の場合は空文字列）
    pub fn a1(&self) -> Result<String, SheetGridError> {
        match &self.spec {
            Some(spec) => spec.to_a1(),
            None => Ok(String::new()),
        }
    }

    /// シート名で修飾した絶対範囲名
    pub fn absolute_name(&self, sheet_title: &str) -> Result<String, SheetGridError> {
        let a1 = self.a1()?;
        Ok(absolute_range_name(sheet_title, Some(&a1)))
    }

    /// ワイヤー形式の範囲
    pub fn grid_range(&self) -> Result<GridRange, SheetGridError> {
        match &self.spec {
            Some(spec) => spec.to_grid_range(self.sheet_id),
            None => Ok(GridRange {
                sheet_id: self.sheet_id,
                ..GridRange::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaper_builder_default() {
        let shaper = GridShaperBuilder::<String>::new().build().unwrap();
        assert_eq!(shaper.blank(), "");
        assert_eq!(shaper.max_batch_cells(), DEFAULT_MAX_CELLS_PER_BATCH);
    }

    #[test]
    fn test_shaper_builder_zero_max() {
        let result = GridShaperBuilder::<String>::new()
            .with_max_batch_cells(0)
            .build();
        assert!(matches!(result, Err(SheetGridError::Config(_))));
    }

    #[test]
    fn test_shaper_fill_gaps_uses_blank_value() {
        let shaper = GridShaperBuilder::new()
            .with_blank_value("-".to_string())
            .build()
            .unwrap();
        let rows = vec![vec!["a".to_string()], vec![]];

        assert_eq!(
            shaper.fill_gaps(rows, None, Some(2)),
            vec![vec!["a", "-"], vec!["-", "-"]]
        );
    }

    #[test]
    fn test_shaper_cell_list_to_rect() {
        let shaper = GridShaperBuilder::<i32>::new().build().unwrap();
        let cells = vec![CellUpdate::new(2, 2, 5), CellUpdate::new(3, 4, 7)];

        assert_eq!(
            shaper.cell_list_to_rect(&cells).unwrap(),
            vec![vec![5, 0, 0], vec![0, 0, 7]]
        );
    }

    #[test]
    fn test_shaper_partition() {
        let shaper = GridShaperBuilder::<u8>::new()
            .with_max_batch_cells(2)
            .build()
            .unwrap();
        let updates: Vec<CellUpdate<u8>> = (1..=5).map(|r| CellUpdate::new(r, 1, 0)).collect();

        let batches = shaper.partition(&updates).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].len(), 1);
    }

    #[test]
    fn test_shaper_batch_update_requests() {
        let shaper = GridShaperBuilder::<String>::new()
            .with_value_input_option(ValueInputOption::UserEntered)
            .with_max_batch_cells(2)
            .build()
            .unwrap();
        let updates = vec![
            CellUpdate::new(1, 1, "=SUM(B1:B2)".to_string()),
            CellUpdate::new(1, 2, "3".to_string()),
            CellUpdate::new(7, 7, "x".to_string()),
        ];

        let requests = shaper.batch_update_requests("Sheet 1", &updates).unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|request| request.value_input_option == ValueInputOption::UserEntered));
        assert_eq!(requests[0].data.len(), 1);
        assert_eq!(requests[0].data[0].range, "'Sheet 1'!A1:B1");
        assert_eq!(requests[1].data[0].range, "'Sheet 1'!G7:G7");
    }

    #[test]
    fn test_shaper_plan_updates_sparse_within_max() {
        let shaper = GridShaperBuilder::<i32>::new()
            .with_max_batch_cells(10)
            .build()
            .unwrap();
        let updates = vec![CellUpdate::new(100, 100, 2), CellUpdate::new(1, 1, 1)];

        let plan = shaper.plan_updates("S", &updates).unwrap();
        assert_eq!(plan.len(), 1);
        let cells: usize = plan[0]
            .iter()
            .map(|range| range.values.iter().map(Vec::len).sum::<usize>())
            .sum();
        assert_eq!(cells, 2);
        assert_eq!(plan[0][0].range, "'S'!A1:A1");
        assert_eq!(plan[0][1].range, "'S'!CV100:CV100");
    }

    #[test]
    fn test_range_spec_to_a1() {
        let bounds = |first_row, first_col, last_row, last_col| RangeSpec::Bounds {
            first_row,
            first_col,
            last_row,
            last_col,
        };

        assert_eq!(
            bounds(Some(1), Some(1), Some(2), Some(2)).to_a1().unwrap(),
            "A1:B2"
        );
        assert_eq!(bounds(None, Some(1), None, Some(2)).to_a1().unwrap(), "A:B");
        assert_eq!(bounds(Some(9), None, Some(5), None).to_a1().unwrap(), "5:9");
        assert_eq!(
            bounds(Some(5), Some(1), None, Some(2)).to_a1().unwrap(),
            "A5:B"
        );
        assert_eq!(bounds(None, None, None, None).to_a1().unwrap(), "");
        assert_eq!(
            RangeSpec::Label("C3".to_string()).to_a1().unwrap(),
            "C3"
        );
    }

    #[test]
    fn test_range_spec_bounds_keep_their_side() {
        // 開始側が無制限で、5行目・C列で終わる範囲
        let open_start = RangeSpec::Bounds {
            first_row: None,
            first_col: None,
            last_row: Some(5),
            last_col: Some(3),
        };

        assert_eq!(
            open_start.to_grid_range(None).unwrap(),
            GridRange {
                end_row_index: Some(5),
                end_column_index: Some(3),
                ..GridRange::default()
            }
        );
        assert_eq!(open_start.to_a1().unwrap(), "A1:C5");

        let open_start_rows = RangeSpec::Bounds {
            first_row: None,
            first_col: Some(2),
            last_row: Some(9),
            last_col: Some(4),
        };
        let grid_range = open_start_rows.to_grid_range(Some(0)).unwrap();
        assert_eq!(grid_range.start_row_index, None);
        assert_eq!(grid_range.end_row_index, Some(9));
        assert_eq!(grid_range.start_column_index, Some(1));
        assert_eq!(open_start_rows.to_a1().unwrap(), "B1:D9");

        let rows_only = RangeSpec::Bounds {
            first_row: None,
            first_col: None,
            last_row: Some(5),
            last_col: None,
        };
        assert_eq!(rows_only.to_a1().unwrap(), "1:5");
        assert!(matches!(
            RangeSpec::Bounds {
                first_row: None,
                first_col: None,
                last_row: Some(0),
                last_col: None,
            }
            .to_grid_range(None),
            Err(SheetGridError::InvalidBound(_))
        ));
    }

    #[test]
    fn test_range_spec_to_a1_errors() {
        let zero = RangeSpec::Bounds {
            first_row: Some(0),
            first_col: Some(1),
            last_row: Some(2),
            last_col: Some(2),
        };
        assert!(matches!(zero.to_a1(), Err(SheetGridError::InvalidBound(_))));

        let open_ended = RangeSpec::Bounds {
            first_row: Some(5),
            first_col: Some(1),
            last_row: None,
            last_col: None,
        };
        assert!(matches!(
            open_ended.to_a1(),
            Err(SheetGridError::InvalidBound(_))
        ));
        // GridRangeとしては表現できる
        let grid_range = open_ended.to_grid_range(None).unwrap();
        assert_eq!(grid_range.start_row_index, Some(4));
        assert_eq!(grid_range.end_row_index, None);
    }

    #[test]
    fn test_range_spec_label_and_bounds_agree() {
        let label = RangeSpec::Label("B2:D8".to_string());
        let bounds = RangeSpec::Bounds {
            first_row: Some(8),
            first_col: Some(4),
            last_row: Some(2),
            last_col: Some(2),
        };

        assert_eq!(
            label.to_grid_range(Some(1)).unwrap(),
            bounds.to_grid_range(Some(1)).unwrap()
        );
        assert_eq!(bounds.to_a1().unwrap(), "B2:D8");
    }

    #[test]
    fn test_range_request_label() {
        let request = RangeRequestBuilder::new()
            .with_label("A1:B2")
            .build()
            .unwrap();

        assert_eq!(request.a1().unwrap(), "A1:B2");
        assert_eq!(request.absolute_name("It's").unwrap(), "'It''s'!A1:B2");
        assert_eq!(request.grid_range().unwrap().end_column_index, Some(2));
    }

    #[test]
    fn test_range_request_whole_sheet() {
        let request = RangeRequestBuilder::new().with_sheet_id(3).build().unwrap();

        assert_eq!(request.spec(), None);
        assert_eq!(request.a1().unwrap(), "");
        assert_eq!(request.absolute_name("Sheet1").unwrap(), "'Sheet1'");
        assert_eq!(
            request.grid_range().unwrap(),
            GridRange {
                sheet_id: Some(3),
                ..GridRange::default()
            }
        );
    }

    #[test]
    fn test_range_request_inconsistent() {
        let result = RangeRequestBuilder::new()
            .with_label("A1")
            .with_bounds(Some(1), Some(1), Some(1), Some(1))
            .build();
        assert!(matches!(
            result,
            Err(SheetGridError::InconsistentGridRequest(_))
        ));
    }

    #[test]
    fn test_range_request_invalid_input() {
        assert!(matches!(
            RangeRequestBuilder::new().with_label("").build(),
            Err(SheetGridError::Config(_))
        ));
        assert!(matches!(
            RangeRequestBuilder::new()
                .with_bounds(Some(0), None, None, None)
                .build(),
            Err(SheetGridError::InvalidBound(_))
        ));
    }
}
