//! Wire Format Module
//!
//! REST APIのリクエストボディで使用する構造体を提供するモジュール。
//! すべて`serde`でcamelCaseのJSONにシリアライズされます。

mod payloads;

use serde::{Deserialize, Serialize};

use crate::error::SheetGridError;

pub use payloads::*;

/// ワイヤー形式の矩形範囲
///
/// インデックスは0始まりの半開区間（開始を含み、終了を含まない）です。
/// `None`のフィールドはJSONから省略され、その方向に境界がないことを表します。
///
/// # 出力例
///
/// ```json
/// {"sheetId": 0, "startRowIndex": 0, "endRowIndex": 10, "startColumnIndex": 0, "endColumnIndex": 1}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// 開始 ≤ 終了であることを検証する
    ///
    /// 開始と終了が等しい（行・列が0個の）範囲は有効です。
    pub fn validate(&self) -> Result<(), SheetGridError> {
        if let (Some(start), Some(end)) = (self.start_row_index, self.end_row_index) {
            if start > end {
                return Err(SheetGridError::InvalidBound(format!(
                    "start row index ({}) > end row index ({})",
                    start, end
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.start_column_index, self.end_column_index) {
            if start > end {
                return Err(SheetGridError::InvalidBound(format!(
                    "start column index ({}) > end column index ({})",
                    start, end
                )));
            }
        }

        Ok(())
    }

    /// 4辺すべての境界が指定されている場合に`(行開始, 行終了, 列開始, 列終了)`を返す
    pub fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        Some((
            self.start_row_index?,
            self.end_row_index?,
            self.start_column_index?,
            self.end_column_index?,
        ))
    }

    /// JSON値に変換
    pub fn to_json(&self) -> Result<serde_json::Value, SheetGridError> {
        Ok(serde_json::to_value(self)?)
    }
}
