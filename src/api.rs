//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 表の探索方向
///
/// `find_table`で開始セルからどの方向に連続する値を拡張するかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TableDirection {
    /// 右方向と下方向の両方に拡張（デフォルト）
    ///
    /// 開始セルから右へ最初の空セルまで、下へ最初の空セルまでを範囲とします。
    /// 表の内部のセルは確認しないため、内部に空セルが含まれる場合があります。
    #[default]
    Table,

    /// 下方向のみに拡張
    Down,

    /// 右方向のみに拡張
    Right,
}

/// 値の並び方向
///
/// ワイヤー形式の`majorDimension`に対応します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Dimension {
    /// 行ごと（デフォルト）
    ///
    /// 例: `[[A1, B1], [A2, B2]]`
    #[default]
    Rows,

    /// 列ごと
    ///
    /// 例: `[[A1, A2], [B1, B2]]`
    Columns,
}

/// 入力値の解釈方法
///
/// ワイヤー形式の`valueInputOption`に対応します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ValueInputOption {
    /// 入力値を解析せずにそのまま保存（デフォルト）
    #[default]
    Raw,

    /// UIで入力した場合と同じ規則で解析
    ///
    /// 数値は数値のまま、文字列は日付や数値に変換される場合があります。
    UserEntered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Dimension::Rows).unwrap(), r#""ROWS""#);
        assert_eq!(
            serde_json::to_string(&Dimension::Columns).unwrap(),
            r#""COLUMNS""#
        );
        assert_eq!(
            serde_json::to_string(&ValueInputOption::UserEntered).unwrap(),
            r#""USER_ENTERED""#
        );
        assert_eq!(
            serde_json::from_str::<ValueInputOption>(r#""RAW""#).unwrap(),
            ValueInputOption::Raw
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TableDirection::default(), TableDirection::Table);
        assert_eq!(Dimension::default(), Dimension::Rows);
        assert_eq!(ValueInputOption::default(), ValueInputOption::Raw);
    }
}
