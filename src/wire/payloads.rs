//! Write Payloads
//!
//! 値の書き込みリクエストで使用するペイロードを提供するモジュール。

use serde::Serialize;

use crate::api::{Dimension, ValueInputOption};
use crate::error::SheetGridError;

/// 1つの範囲への値の書き込み
///
/// # 出力例
///
/// ```json
/// {"range": "'Sheet1'!A1:B1", "majorDimension": "ROWS", "values": [["a", "b"]]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange<T> {
    /// シート名で修飾したA1記法の範囲
    pub range: String,

    pub major_dimension: Dimension,

    /// 範囲と同じ大きさの矩形
    pub values: Vec<Vec<T>>,
}

impl<T> ValueRange<T> {
    /// 行方向の`ValueRange`を生成
    pub fn rows(range: String, values: Vec<Vec<T>>) -> Self {
        Self {
            range,
            major_dimension: Dimension::Rows,
            values,
        }
    }
}

/// 複数範囲への一括書き込みリクエストのボディ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateValuesRequest<T> {
    pub value_input_option: ValueInputOption,
    pub data: Vec<ValueRange<T>>,
}

impl<T: Serialize> BatchUpdateValuesRequest<T> {
    /// 新しいリクエストを生成
    pub fn new(value_input_option: ValueInputOption, data: Vec<ValueRange<T>>) -> Self {
        Self {
            value_input_option,
            data,
        }
    }

    /// JSON文字列にシリアライズ
    pub fn to_json_string(&self) -> Result<String, SheetGridError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_range_serialize() {
        let value_range = ValueRange::rows(
            "'Sheet1'!A1:B2".to_string(),
            vec![vec![Some("a"), None], vec![None, Some("d")]],
        );

        assert_eq!(
            serde_json::to_value(&value_range).unwrap(),
            json!({
                "range": "'Sheet1'!A1:B2",
                "majorDimension": "ROWS",
                "values": [["a", null], [null, "d"]]
            })
        );
    }

    #[test]
    fn test_batch_update_request_serialize() {
        let request = BatchUpdateValuesRequest::new(
            ValueInputOption::UserEntered,
            vec![ValueRange::rows("'S'!A1".to_string(), vec![vec![1]])],
        );
        let body: serde_json::Value =
            serde_json::from_str(&request.to_json_string().unwrap()).unwrap();

        assert_eq!(body["valueInputOption"], "USER_ENTERED");
        assert_eq!(body["data"][0]["range"], "'S'!A1");
        assert_eq!(body["data"][0]["values"], json!([[1]]));
    }
}
