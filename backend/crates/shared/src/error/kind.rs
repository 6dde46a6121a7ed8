//! Failure Kind - Classification of errors
//!
//! Defines the [`FailureKind`] enum that decides which exception handler
//! formats a failure and which HTTP status it is sent with.

use serde::Serialize;

/// 失敗種別の列挙体
///
/// 例外マッパーはこの分類でハンドラを選択します。
/// クライアントに詳細を返すのは `FieldValidation` のみです。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::FailureKind;
///
/// let kind = FailureKind::FieldValidation;
/// assert_eq!(kind.status_code(), 400);
/// assert_eq!(kind.as_str(), "Field Validation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum FailureKind {
    /// 400 - 宣言された制約に違反した（フィールド単位の詳細を返す）
    FieldValidation,
    /// 500 - 存在すべき値が欠落していた（詳細はログのみ）
    NullReference,
    /// 500 - 分類できない失敗（メッセージに原因の文字列を含む）
    Unclassified,
    /// 500 - 設定ミス（存在しない兄弟フィールド、解析できない日付など）
    Configuration,
}

impl FailureKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::FailureKind;
    /// assert_eq!(FailureKind::FieldValidation.status_code(), 400);
    /// assert_eq!(FailureKind::Unclassified.status_code(), 500);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            FailureKind::FieldValidation => 400,
            FailureKind::NullReference
            | FailureKind::Unclassified
            | FailureKind::Configuration => 500,
        }
    }

    /// ログ向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FailureKind::FieldValidation => "Field Validation",
            FailureKind::NullReference => "Null Reference",
            FailureKind::Unclassified => "Unclassified",
            FailureKind::Configuration => "Configuration",
        }
    }

    /// サーバー側の失敗かどうかを判定
    ///
    /// これらの失敗はログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// クライアントに詳細を返してよいかどうか
    #[inline]
    pub const fn exposes_detail(&self) -> bool {
        matches!(self, FailureKind::FieldValidation)
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FailureKind::FieldValidation.status_code(), 400);
        assert_eq!(FailureKind::NullReference.status_code(), 500);
        assert_eq!(FailureKind::Unclassified.status_code(), 500);
        assert_eq!(FailureKind::Configuration.status_code(), 500);
    }

    #[test]
    fn test_is_server_error() {
        assert!(!FailureKind::FieldValidation.is_server_error());
        assert!(FailureKind::NullReference.is_server_error());
        assert!(FailureKind::Configuration.is_server_error());
    }

    #[test]
    fn test_only_field_validation_exposes_detail() {
        assert!(FailureKind::FieldValidation.exposes_detail());
        assert!(!FailureKind::NullReference.exposes_detail());
        assert!(!FailureKind::Unclassified.exposes_detail());
        assert!(!FailureKind::Configuration.exposes_detail());
    }

    #[test]
    fn test_serialize_screaming_snake() {
        let json = serde_json::to_string(&FailureKind::NullReference).unwrap();
        assert_eq!(json, r#""NULL_REFERENCE""#);
    }
}
