//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Serialize, Serializer};

use crate::error::SheetGridError;

/// セルの値を表す列挙型
///
/// 文字列として受け取ったセル値を数値化した結果を表します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 整数
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    Text(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値を文字列として取得
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Int(n) => serializer.serialize_i64(*n),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Text(s) => serializer.serialize_str(s),
            // 空セルはAPIの空文字列と同じ表現にする
            CellValue::Empty => serializer.serialize_str(""),
        }
    }
}

/// セル座標（1始まり）
///
/// 行・列ともに1以上であることを保証します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    /// 新しい座標を生成
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellAddress)` - 行・列がともに1以上の場合
    /// * `Err(SheetGridError::InvalidBound)` - いずれかが0の場合
    pub fn new(row: u32, col: u32) -> Result<Self, SheetGridError> {
        if row < 1 || col < 1 {
            return Err(SheetGridError::InvalidBound(format!(
                "cell address must be 1-based, got ({}, {})",
                row, col
            )));
        }
        Ok(Self { row, col })
    }

    /// A1形式の文字列に変換（例: (1, 1) -> "A1"）
    pub fn to_a1(self) -> String {
        format!("{}{}", crate::address::column_letters(self.col), self.row)
    }
}

impl From<CellAddress> for (u32, u32) {
    fn from(address: CellAddress) -> Self {
        (address.row, address.col)
    }
}

/// 範囲の片側を解析した結果
///
/// 英字と数字の両方 → `Full`、英字のみ → `ColumnOnly`、数字のみ → `RowOnly`、
/// 空文字列 → `Unbounded`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEndpoint {
    /// 行と列の両方が指定されている（例: "B3"）
    Full { row: u32, col: u32 },

    /// 列のみ（例: "B"）
    ColumnOnly(u32),

    /// 行のみ（例: "3"）
    RowOnly(u32),

    /// 何も指定されていない
    Unbounded,
}

impl RangeEndpoint {
    /// 行番号（未指定なら`None`）
    pub fn row(&self) -> Option<u32> {
        match *self {
            RangeEndpoint::Full { row, .. } | RangeEndpoint::RowOnly(row) => Some(row),
            RangeEndpoint::ColumnOnly(_) | RangeEndpoint::Unbounded => None,
        }
    }

    /// 列番号（未指定なら`None`）
    pub fn col(&self) -> Option<u32> {
        match *self {
            RangeEndpoint::Full { col, .. } | RangeEndpoint::ColumnOnly(col) => Some(col),
            RangeEndpoint::RowOnly(_) | RangeEndpoint::Unbounded => None,
        }
    }
}

/// 単一セルへの更新（座標は1始まり）
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate<T> {
    pub row: u32,
    pub col: u32,
    pub value: T,
}

impl<T> CellUpdate<T> {
    /// 新しい更新を生成
    pub fn new(row: u32, col: u32, value: T) -> Self {
        Self { row, col, value }
    }
}

/// セル範囲（1始まり、両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRect {
    /// 新しい範囲を生成
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    /// 更新リストの外接矩形を計算
    ///
    /// 空のリスト、または0の座標を含むリストの場合は`None`を返します。
    pub fn bounding<T>(cells: &[CellUpdate<T>]) -> Option<Self> {
        let first = cells.first()?;
        let (mut min_row, mut max_row) = (first.row, first.row);
        let (mut min_col, mut max_col) = (first.col, first.col);

        for cell in cells {
            min_row = min_row.min(cell.row);
            max_row = max_row.max(cell.row);
            min_col = min_col.min(cell.col);
            max_col = max_col.max(cell.col);
        }

        let start = CellAddress::new(min_row, min_col).ok()?;
        let end = CellAddress::new(max_row, max_col).ok()?;
        Some(Self::new(start, end))
    }

    /// 指定された座標が範囲内にあるかを判定
    pub fn contains(&self, address: CellAddress) -> bool {
        address.row >= self.start.row
            && address.row <= self.end.row
            && address.col >= self.start.col
            && address.col <= self.end.col
    }

    /// 範囲のサイズ（行数 × 列数）を計算
    pub fn size(&self) -> (u32, u32) {
        let rows = self.end.row - self.start.row + 1;
        let cols = self.end.col - self.start.col + 1;
        (rows, cols)
    }

    /// A1記法の範囲文字列に変換（例: "A1:C3"）
    pub fn to_a1(&self) -> String {
        format!("{}:{}", self.start.to_a1(), self.end.to_a1())
    }
}
