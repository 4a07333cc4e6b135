//! Records Module
//!
//! ヘッダー行とデータ行を組み合わせて、ヘッダー名をキーとするレコードに変換するモジュール。
//! ヘッダーの重複は上書きせず、変換前にエラーとして検出します。

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::SheetGridError;
use crate::types::CellValue;

/// 数値化の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericiseOptions {
    /// 空セルを`Int(0)`にする
    pub empty_to_zero: bool,

    /// `1_000`のようなアンダースコア区切りの数値を受け付ける
    pub allow_underscores: bool,
}

/// 文字列のセル値を数値化する
///
/// # 変換規則
///
/// - 整数として解釈できる文字列 → `Int`（桁区切りのカンマは除去）
/// - 浮動小数点数として解釈できる文字列 → `Float`
/// - 空文字列 → `Empty`（`empty_to_zero`の場合は`Int(0)`）
/// - アンダースコアを含む文字列は`allow_underscores`の場合のみ数値化
/// - それ以外 → `Text`（元の文字列のまま）
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::{numericise, CellValue, NumericiseOptions};
///
/// let options = NumericiseOptions::default();
/// assert_eq!(numericise("2,000", options), CellValue::Int(2000));
/// assert_eq!(numericise("3.1", options), CellValue::Float(3.1));
/// assert_eq!(numericise("3_2", options), CellValue::Text("3_2".to_string()));
/// ```
pub fn numericise(value: &str, options: NumericiseOptions) -> CellValue {
    if value.is_empty() {
        return if options.empty_to_zero {
            CellValue::Int(0)
        } else {
            CellValue::Empty
        };
    }

    if value.contains('_') && !options.allow_underscores {
        return CellValue::Text(value.to_string());
    }

    let cleaned = value.replace(['_', ','], "");
    let cleaned = cleaned.trim();

    if let Ok(n) = cleaned.parse::<i64>() {
        CellValue::Int(n)
    } else if let Ok(f) = cleaned.parse::<f64>() {
        CellValue::Float(f)
    } else {
        CellValue::Text(value.to_string())
    }
}

/// ヘッダー名をキーとする1行分のレコード
///
/// ヘッダー行の順序を保持します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// キーに対応する値を取得
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// ヘッダー順のキー
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// ヘッダー順の(キー, 値)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// ヘッダーが一意であることを検証（内部ヘルパー）
fn ensure_unique<S: AsRef<str>>(headers: &[S]) -> Result<(), SheetGridError> {
    let mut seen = HashSet::new();
    for header in headers {
        if !seen.insert(header.as_ref()) {
            return Err(SheetGridError::DuplicateHeader(header.as_ref().to_string()));
        }
    }
    Ok(())
}

/// ヘッダーとデータ行からレコードのリストを生成する
///
/// 空のヘッダーも1つの名前として扱うため、空のヘッダーが2つあれば重複になります。
/// ヘッダーより短い行は`Empty`で埋め、長い行の余分な値は捨てます。
///
/// # 戻り値
///
/// * `Ok(Vec<Record>)` - データ行と同じ数のレコード
/// * `Err(SheetGridError::DuplicateHeader)` - ヘッダーに重複がある場合
pub fn to_records<S: AsRef<str>>(
    headers: &[S],
    rows: &[Vec<CellValue>],
) -> Result<Vec<Record>, SheetGridError> {
    ensure_unique(headers)?;

    let records = rows
        .iter()
        .map(|row| Record {
            fields: headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = row.get(idx).cloned().unwrap_or(CellValue::Empty);
                    (header.as_ref().to_string(), value)
                })
                .collect(),
        })
        .collect();

    Ok(records)
}

/// シート全体の値からレコードを生成する際の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    /// ヘッダーとして使う行（1始まり）
    pub head: usize,

    /// 存在と一意性を確認するヘッダー（`None`の場合はヘッダー行全体）
    pub expected_headers: Option<Vec<String>>,

    /// 値を数値化するか
    pub numericise: bool,

    pub numericise_options: NumericiseOptions,

    /// 数値化しない列（1始まり）
    pub numericise_ignore: Vec<usize>,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            head: 1,
            expected_headers: None,
            numericise: true,
            numericise_options: NumericiseOptions::default(),
            numericise_ignore: Vec::new(),
        }
    }
}

/// シート全体の値をヘッダー行をキーとするレコードに変換する
///
/// `head`行目をヘッダーとし、それより後の行をレコードにします。
/// シートの行数が`head`未満の場合は空のリストを返します。
/// `expected_headers`を指定すると、期待ヘッダー以外の列の重複（空のヘッダーを含む）は
/// 許容され、同じ名前の列は最初の列だけがレコードに含まれます。
///
/// # 戻り値
///
/// * `Ok(Vec<Record>)` - 変換に成功した場合
/// * `Err(SheetGridError::DuplicateHeader)` - `expected_headers`が`None`でヘッダー行に重複がある場合、
///   または`expected_headers`の名前が重複している場合
/// * `Err(SheetGridError::UnknownHeader)` - `expected_headers`にヘッダー行にない名前がある場合
/// * `Err(SheetGridError::InvalidBound)` - `head`が0の場合
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::{get_all_records, CellValue, RecordOptions};
///
/// let values = vec![
///     vec!["name".to_string(), "age".to_string()],
///     vec!["Alice".to_string(), "30".to_string()],
/// ];
/// let records = get_all_records(&values, &RecordOptions::default()).unwrap();
/// assert_eq!(records[0].get("age"), Some(&CellValue::Int(30)));
/// ```
pub fn get_all_records(
    values: &[Vec<String>],
    options: &RecordOptions,
) -> Result<Vec<Record>, SheetGridError> {
    if options.head < 1 {
        return Err(SheetGridError::InvalidBound(
            "head row must be >= 1".to_string(),
        ));
    }
    let idx = options.head - 1;

    let Some(headers) = values.get(idx) else {
        return Ok(Vec::new());
    };
    let columns = record_columns(headers, options.expected_headers.as_deref())?;
    let keys: Vec<&str> = columns.iter().map(|&i| headers[i].as_str()).collect();

    let rows: Vec<Vec<CellValue>> = values[idx + 1..]
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&col_idx| match row.get(col_idx) {
                    Some(cell)
                        if options.numericise
                            && !options.numericise_ignore.contains(&(col_idx + 1)) =>
                    {
                        numericise(cell, options.numericise_options)
                    }
                    Some(cell) => CellValue::Text(cell.clone()),
                    None => CellValue::Empty,
                })
                .collect()
        })
        .collect();

    to_records(&keys, &rows)
}

/// レコードに含める列のインデックスを決める（内部ヘルパー）
///
/// `expected`が`None`の場合はヘッダー行全体が一意である必要がある。
/// 指定された場合は`expected`の名前だけが一意性の対象で、それ以外の
/// 重複した列は最初に現れた列だけを使う。
fn record_columns(
    headers: &[String],
    expected: Option<&[String]>,
) -> Result<Vec<usize>, SheetGridError> {
    let Some(expected) = expected else {
        ensure_unique(headers)?;
        return Ok((0..headers.len()).collect());
    };
    ensure_unique(expected)?;

    let unknown: Vec<String> = expected
        .iter()
        .filter(|name| !headers.contains(name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(SheetGridError::UnknownHeader(unknown));
    }

    // 期待ヘッダーはヘッダー行にも1回だけ現れること
    if let Some(name) = expected
        .iter()
        .find(|name| headers.iter().filter(|header| header == name).count() > 1)
    {
        return Err(SheetGridError::DuplicateHeader(name.clone()));
    }

    let mut seen = HashSet::new();
    Ok((0..headers.len())
        .filter(|&i| seen.insert(headers[i].as_str()))
        .collect())
}
