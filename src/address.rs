//! Address Module
//!
//! A1記法と1始まりの(行, 列)座標、およびワイヤー形式の`GridRange`との相互変換を
//! 提供するモジュール。
//!
//! 列の英字は「0の桁を持たない26進法」（A=1 .. Z=26）として扱います。
//! `A`=1, `Z`=26, `AA`=27, `AZ`=52, `BA`=53。

use crate::error::SheetGridError;
use crate::types::{CellAddress, RangeEndpoint};
use crate::wire::GridRange;

const ALPHABET_LEN: u32 = 26;

/// A1記法のラベルを(行, 列)に変換する
///
/// 英字（大文字・小文字を区別しない）の直後に数字が続く形式のみを受け付けます。
///
/// # 戻り値
///
/// * `Ok(CellAddress)` - 行・列ともに1以上の座標
/// * `Err(SheetGridError::MalformedAddress)` - 形式が一致しない、行が0または先頭ゼロ、
///   あるいは`u32`に収まらない場合
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::a1_to_rowcol;
///
/// let address = a1_to_rowcol("ABC3").unwrap();
/// assert_eq!((address.row, address.col), (3, 731));
/// ```
pub fn a1_to_rowcol(label: &str) -> Result<CellAddress, SheetGridError> {
    match parse_endpoint(label)? {
        RangeEndpoint::Full { row, col } => Ok(CellAddress { row, col }),
        _ => Err(SheetGridError::MalformedAddress(label.to_string())),
    }
}

/// (行, 列)をA1記法のラベルに変換する
///
/// # 戻り値
///
/// * `Ok(String)` - 例: `(1, 27)` → `"AA1"`、`(27, 1)` → `"A27"`
/// * `Err(SheetGridError::InvalidBound)` - 行または列が0の場合
pub fn rowcol_to_a1(row: u32, col: u32) -> Result<String, SheetGridError> {
    Ok(CellAddress::new(row, col)?.to_a1())
}

/// 列の英字を1始まりの列番号に変換する（例: "AZ" → 52）
pub fn column_letter_to_index(letters: &str) -> Result<u32, SheetGridError> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(SheetGridError::MalformedAddress(letters.to_string()));
    }
    letters_to_index(letters)
        .ok_or_else(|| SheetGridError::MalformedAddress(letters.to_string()))
}

/// 1始まりの列番号を列の英字に変換する（例: 52 → "AZ"）
pub fn column_index_to_letter(col: u32) -> Result<String, SheetGridError> {
    if col < 1 {
        return Err(SheetGridError::InvalidBound(format!(
            "column must be >= 1, got {}",
            col
        )));
    }
    Ok(column_letters(col))
}

/// 列番号を英字に変換（内部ヘルパー、`col >= 1`が前提）
///
/// `col mod 26`ではなく`(col - 1) mod 26`を使うことで、Zの次がAAになる。
pub(crate) fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let remainder = (col - 1) % ALPHABET_LEN;
        letters.push(b'A' + remainder as u8);
        col = (col - 1) / ALPHABET_LEN;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// 英字を列番号に変換（内部ヘルパー、桁あふれ時は`None`）
fn letters_to_index(letters: &str) -> Option<u32> {
    letters.bytes().try_fold(0u32, |col, b| {
        let value = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col.checked_mul(ALPHABET_LEN)?.checked_add(value)
    })
}

/// 行番号を解析（内部ヘルパー）
///
/// 先頭ゼロを拒否することで、1つの座標に対応するラベルを1つに保つ。
fn parse_row(digits: &str) -> Option<u32> {
    if digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

/// 範囲の片側を解析する
///
/// 英字と数字 → `Full`、英字のみ → `ColumnOnly`、数字のみ → `RowOnly`、
/// 空文字列 → `Unbounded`。それ以外は`MalformedAddress`。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::{parse_endpoint, RangeEndpoint};
///
/// assert_eq!(parse_endpoint("b").unwrap(), RangeEndpoint::ColumnOnly(2));
/// assert_eq!(parse_endpoint("7").unwrap(), RangeEndpoint::RowOnly(7));
/// assert!(parse_endpoint("1A").is_err());
/// ```
pub fn parse_endpoint(side: &str) -> Result<RangeEndpoint, SheetGridError> {
    let malformed = || SheetGridError::MalformedAddress(side.to_string());

    let split = side
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(side.len());
    let (letters, digits) = side.split_at(split);

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let col = if letters.is_empty() {
        None
    } else {
        Some(letters_to_index(letters).ok_or_else(malformed)?)
    };
    let row = if digits.is_empty() {
        None
    } else {
        Some(parse_row(digits).ok_or_else(malformed)?)
    };

    Ok(match (row, col) {
        (Some(row), Some(col)) => RangeEndpoint::Full { row, col },
        (None, Some(col)) => RangeEndpoint::ColumnOnly(col),
        (Some(row), None) => RangeEndpoint::RowOnly(row),
        (None, None) => RangeEndpoint::Unbounded,
    })
}

/// A1記法の1軸分の境界を昇順に並べる（未指定の境界は+∞として扱う）
///
/// "A5:B"の行のように片側だけ指定された軸は、指定された値を開始とする。
pub(crate) fn sort_axis(a: Option<u32>, b: Option<u32>) -> (Option<u32>, Option<u32>) {
    match (a, b) {
        (Some(x), Some(y)) => (Some(x.min(y)), Some(x.max(y))),
        (Some(x), None) | (None, Some(x)) => (Some(x), None),
        (None, None) => (None, None),
    }
}

/// 数値で指定された1軸分の境界を並べる
///
/// 両方指定されている場合のみ昇順に並べ、片側だけの場合はその側に残す。
pub(crate) fn order_bounds(first: Option<u32>, last: Option<u32>) -> (Option<u32>, Option<u32>) {
    match (first, last) {
        (Some(x), Some(y)) => (Some(x.min(y)), Some(x.max(y))),
        bounds => bounds,
    }
}

/// 並べ替え済みの1始まり境界から`GridRange`を生成（内部ヘルパー）
///
/// 開始は`value - 1`、終了は1始まりの最終値をそのまま排他的終端として使う。
pub(crate) fn grid_range_from_bounds(
    (first_row, last_row): (Option<u32>, Option<u32>),
    (first_col, last_col): (Option<u32>, Option<u32>),
    sheet_id: Option<u32>,
) -> Result<GridRange, SheetGridError> {
    if [first_row, last_row, first_col, last_col].contains(&Some(0)) {
        return Err(SheetGridError::InvalidBound(
            "range bounds must be 1-based".to_string(),
        ));
    }

    let grid_range = GridRange {
        sheet_id,
        start_row_index: first_row.map(|row| row - 1),
        end_row_index: last_row,
        start_column_index: first_col.map(|col| col - 1),
        end_column_index: last_col,
    };
    grid_range.validate()?;

    Ok(grid_range)
}

/// A1記法の範囲を`GridRange`に変換する
///
/// "A1:B10"、単一セル"A1"、列のみ"A:C"、行のみ"2:9"を受け付けます。
/// 2つの角は軸ごとに並べ替えるため、"D4:A1"と"A1:D4"は同じ結果になります。
/// 指定されなかった境界はフィールドごと省略されます。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::a1_range_to_grid_range;
///
/// let range = a1_range_to_grid_range("A5:B", None).unwrap();
/// assert_eq!(range.start_row_index, Some(4));
/// assert_eq!(range.end_row_index, None);
/// assert_eq!(range.start_column_index, Some(0));
/// assert_eq!(range.end_column_index, Some(2));
/// ```
pub fn a1_range_to_grid_range(
    name: &str,
    sheet_id: Option<u32>,
) -> Result<GridRange, SheetGridError> {
    let (start_label, end_label) = match name.split_once(':') {
        Some((start, end)) if !end.is_empty() => (start, end),
        Some((start, _)) => (start, start),
        None => (name, name),
    };

    let start = parse_endpoint(start_label)?;
    let end = parse_endpoint(end_label)?;

    grid_range_from_bounds(
        sort_axis(start.row(), end.row()),
        sort_axis(start.col(), end.col()),
        sheet_id,
    )
}

/// シート名で修飾した絶対範囲名を生成する
///
/// シート名は常にシングルクォートで囲み、名前中のシングルクォートは二重にします。
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::absolute_range_name;
///
/// assert_eq!(absolute_range_name("Sheet1", Some("A1:B1")), "'Sheet1'!A1:B1");
/// assert_eq!(absolute_range_name("Sheet'1", None), "'Sheet''1'");
/// ```
pub fn absolute_range_name(sheet_title: &str, range_name: Option<&str>) -> String {
    let quoted = format!("'{}'", sheet_title.replace('\'', "''"));

    match range_name {
        Some(range) if !range.is_empty() => format!("{}!{}", quoted, range),
        _ => quoted,
    }
}

/// 両端が完全なセル指定の範囲（例: "A1:B2"、"Sheet1!A1:B2"）を含むかを判定
///
/// "A1:B"や"A1"は`false`になります。
pub fn is_full_a1_notation(range_name: &str) -> bool {
    let bytes = range_name.as_bytes();

    bytes.iter().enumerate().any(|(idx, &b)| {
        b == b':' && ends_with_cell(&bytes[..idx]) && starts_with_cell(&bytes[idx + 1..])
    })
}

/// `[A-Za-z]+[0-9]+`で終わるか（内部ヘルパー）
fn ends_with_cell(bytes: &[u8]) -> bool {
    let digits = bytes.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    let letters = bytes[..bytes.len() - digits]
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    digits > 0 && letters > 0
}

/// `[A-Za-z]+[0-9]+`で始まるか（内部ヘルパー）
fn starts_with_cell(bytes: &[u8]) -> bool {
    let letters = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    let digits = bytes[letters..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    digits > 0 && letters > 0
}

/// 絶対範囲名からシート名を取り除いたA1記法を返す
///
/// "Sheet1!A1:B2" → "A1:B2"、"A1:B2" → "A1:B2"
pub fn get_a1_from_absolute_range(range_name: &str) -> &str {
    match range_name.rsplit_once('!') {
        Some((_, a1)) => a1,
        None => range_name,
    }
}
