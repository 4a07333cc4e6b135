//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// sheetgridクレート全体で使用するエラー型
///
/// A1記法の解析、グリッド範囲の変換、グリッド整形、バッチ分割の処理中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
/// いずれも呼び出し側の入力不正を表すため、リトライの対象にはなりません。
///
/// # エラーの種類
///
/// - `MalformedAddress`: A1記法のラベルが期待される形式に一致しない
/// - `InvalidBound`: 行・列番号が1未満、または正規化後も開始 > 終了
/// - `InconsistentGridRequest`: A1ラベルと数値範囲が同時に指定された
/// - `DuplicateHeader` / `UnknownHeader`: レコード変換時のヘッダー不整合
/// - `InvalidInput`: 値グリッドの外側を指す開始セルなど
/// - `Config`: ビルダー設定の検証エラー
/// - `Json`: ワイヤー形式へのシリアライズエラー
///
/// # 使用例
///
/// ```rust
/// use sheetgrid::{a1_to_rowcol, SheetGridError};
///
/// match a1_to_rowcol("1A") {
///     Err(SheetGridError::MalformedAddress(label)) => assert_eq!(label, "1A"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetGridError {
    /// A1記法のラベルが不正
    ///
    /// 英字の後に数字が続く形式（範囲の片側では英字のみ・数字のみも可）に
    /// 一致しない場合に発生します。行番号の先頭ゼロ、`u32`を超える列・行も含みます。
    #[error("Malformed cell address: '{0}'")]
    MalformedAddress(String),

    /// 行・列の境界値が不正
    ///
    /// 1始まりの行・列番号が0の場合や、正規化済みのはずのグリッド範囲で
    /// 開始インデックスが終了インデックスを超えている場合に発生します。
    #[error("Invalid bound: {0}")]
    InvalidBound(String),

    /// 範囲指定の矛盾
    ///
    /// A1記法のラベルと数値の範囲を同時に指定した場合に発生します。
    #[error("Inconsistent grid request: {0}")]
    InconsistentGridRequest(String),

    /// ヘッダー行に重複がある
    #[error("Duplicate header: '{0}'")]
    DuplicateHeader(String),

    /// 期待ヘッダーにヘッダー行に存在しない名前が含まれている
    #[error("Unknown headers: {0:?}")]
    UnknownHeader(Vec<String>),

    /// 入力値が処理対象の範囲外
    #[error("Invalid input value: {0}")]
    InvalidInput(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `GridShaperBuilder::build()`などの検証で無効な設定が検出された場合に
    /// 発生します。例えば、バッチあたりの最大セル数に0を指定した場合などです。
    ///
    /// # 例
    ///
    /// ```rust
    /// use sheetgrid::{GridShaperBuilder, SheetGridError};
    ///
    /// let result = GridShaperBuilder::<String>::new()
    ///     .with_max_batch_cells(0)
    ///     .build();
    ///
    /// assert!(matches!(result, Err(SheetGridError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSONシリアライズのエラー
    ///
    /// `#[from]`属性により、`serde_json::Error`から自動的に変換されます。
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
