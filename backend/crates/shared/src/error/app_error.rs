//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::FailureKind;
use crate::schema::Schema;
use crate::validate::FieldViolation;

/// アプリケーション統一エラー型
///
/// リクエスト処理中に発生した失敗を表します。
/// 例外マッパーが `kind` を見てレスポンスエンベロープに変換します。
///
/// ## Fields
/// * `kind` - 失敗の分類（ハンドラ選択と HTTP ステータスに使用）
/// * `message` - 失敗の要約（サーバーログ向け）
/// * `violations` - フィールド検証違反の一覧（`FieldValidation` のみ）
/// * `schema` - 違反対象の型のフィールドラベル（オプション）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::FailureKind};
/// use kernel::validate::FieldViolation;
///
/// // シンプルなエラー
/// let err = AppError::unclassified("Upstream call failed");
/// assert_eq!(err.kind(), FailureKind::Unclassified);
///
/// // フィールド検証エラー
/// let err = AppError::validation(vec![FieldViolation::object("end date is before start date")]);
/// assert_eq!(err.violations().len(), 1);
/// ```
pub struct AppError {
    /// 失敗種別
    kind: FailureKind,
    /// 要約メッセージ
    message: Cow<'static, str>,
    /// フィールド検証違反
    violations: Vec<FieldViolation>,
    /// 対象型のスキーマ
    schema: Option<&'static Schema>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn first_slot(slots: &[u32]) -> AppResult<u32> {
///     slots
///         .first()
///         .copied()
///         .ok_or_else(|| AppError::null_reference("slot list was empty"))
/// }
/// assert!(first_slot(&[]).is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - 失敗種別
    /// * `message` - 要約メッセージ
    #[inline]
    pub fn new(kind: FailureKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: Vec::new(),
            schema: None,
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// フィールド検証エラー
    #[inline]
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self {
            violations,
            ..Self::new(FailureKind::FieldValidation, "Data validation failed")
        }
    }

    /// 値の欠落エラー
    #[inline]
    pub fn null_reference(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FailureKind::NullReference, message)
    }

    /// 分類不能なエラー
    #[inline]
    pub fn unclassified(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FailureKind::Unclassified, message)
    }

    /// 設定ミスによるエラー
    #[inline]
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FailureKind::Configuration, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 対象型のスキーマを設定（ラベル解決に使用）
    #[inline]
    pub fn with_schema(mut self, schema: &'static Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn read_config() -> AppResult<String> {
    ///     std::fs::read_to_string("/nonexistent/config.json")
    ///         .map_err(|e| AppError::unclassified("Failed to read config").with_source(e))
    /// }
    /// assert!(read_config().is_err());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// 失敗種別を取得
    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// フィールド検証違反を取得
    #[inline]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// 対象型のスキーマを取得
    #[inline]
    pub fn schema(&self) -> Option<&'static Schema> {
        self.schema
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if !self.violations.is_empty() {
            builder.field("violations", &self.violations);
        }
        if let Some(schema) = self.schema {
            builder.field("schema", &schema.name());
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `AppResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// エラーを `AppError` に変換し、指定した種別とメッセージでラップ
    fn map_app_err(self, kind: FailureKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: FailureKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

/// `Option<T>` を `AppResult<T>` に変換するための拡張トレイト
pub trait OptionExt<T> {
    /// `None` の場合に `AppError` を返す
    fn ok_or_app_err(self, kind: FailureKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>;

    /// `None` の場合に `NullReference` を返す
    fn ok_or_null(self, message: impl Into<Cow<'static, str>>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_app_err(self, kind: FailureKind, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_else(|| AppError::new(kind, message))
    }

    fn ok_or_null(self, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_app_err(FailureKind::NullReference, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static BOOKING: LazyLock<Schema> =
        LazyLock::new(|| Schema::new("Booking").field("check_in", "Check-in date"));

    #[test]
    fn test_new_error() {
        let err = AppError::new(FailureKind::Unclassified, "Upstream failed");
        assert_eq!(err.kind(), FailureKind::Unclassified);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Upstream failed");
        assert!(err.violations().is_empty());
        assert!(err.schema().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::validation(vec![]).status_code(), 400);
        assert_eq!(AppError::null_reference("test").status_code(), 500);
        assert_eq!(AppError::unclassified("test").status_code(), 500);
        assert_eq!(AppError::configuration("test").status_code(), 500);
        assert_eq!(
            AppError::configuration("test").kind(),
            FailureKind::Configuration
        );
    }

    #[test]
    fn test_validation_carries_violations_and_schema() {
        let err = AppError::validation(vec![
            FieldViolation::field("check_in", None, "must not be empty"),
            FieldViolation::object("dates overlap"),
        ])
        .with_schema(&BOOKING);

        assert_eq!(err.kind(), FailureKind::FieldValidation);
        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.schema().map(Schema::name), Some("Booking"));
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::unclassified("Failed to read file").with_source(io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("caused by: file not found"));
    }

    #[test]
    fn test_display() {
        let err = AppError::null_reference("slot missing");
        assert_eq!(err.to_string(), "[Null Reference] slot missing");
    }

    #[test]
    fn test_result_ext() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::other("boom"));
        let app_result = result.map_app_err(FailureKind::Unclassified, "Call failed");
        let err = app_result.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unclassified);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        let result = none.ok_or_null("Item missing");
        assert_eq!(result.unwrap_err().kind(), FailureKind::NullReference);

        let some: Option<i32> = Some(42);
        assert_eq!(some.ok_or_null("Item missing").unwrap(), 42);
    }
}
