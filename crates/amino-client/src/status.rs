//! Service status codes
//!
//! Failed responses carry a numeric `api:statuscode` next to an
//! `api:message`. Every REST call decodes them through [`ApiErrorKind::from_code`]
//! so one code always means the same error regardless of the endpoint.

use serde_json::Value;
use std::fmt;

/// Body key holding the numeric status code
pub const STATUS_CODE_KEY: &str = "api:statuscode";

/// Body key holding the service's message
pub const STATUS_MESSAGE_KEY: &str = "api:message";

/// Error condition named by a service status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 100
    UnsupportedService,
    /// 102
    FileTooLarge,
    /// 103, 104
    InvalidRequest,
    /// 105
    InvalidSession,
    /// 106
    AccessDenied,
    /// 107
    UnexistentData,
    /// 113
    MessageNeeded,
    /// 200, also returned for an email that is already registered
    InvalidAccountOrPassword,
    /// 210
    AccountDisabled,
    /// 213
    InvalidEmail,
    /// 214: passwords need 6 or more characters and no spaces
    InvalidPassword,
    /// 215, also used for unsupported email domains
    EmailAlreadyTaken,
    /// 216
    AccountDoesntExist,
    /// 218
    InvalidDevice,
    /// 219, also returned when a device reached its account limit
    TooManyRequests,
    /// 221
    CantFollowYourself,
    /// 225
    UserUnavailable,
    /// 229
    YouAreBanned,
    /// 230
    UserNotMemberOfCommunity,
    /// 240
    ReachedTitleLength,
    /// 246
    AccountDeleted,
    /// 249
    PhoneNumberRequired,
    /// 251
    EmailNoPassword,
    /// 262
    ReachedMaxTitles,
    /// 270
    VerificationRequired,
    /// 271
    InvalidAuthNewDeviceLink,
    /// 291
    CommandCooldown,
    /// 300
    BadImage,
    /// 313
    InvalidThemepack,
    /// 314
    InvalidVoiceNote,
    /// 500, 1600
    RequestedNoLongerExists,
    /// 503
    PageRepostedTooRecently,
    /// 551
    InsufficientLevel,
    /// 702
    WallCommentingDisabled,
    /// 801
    CommunityNoLongerExists,
    /// 802
    InvalidCodeOrLink,
    /// 805
    CommunityNameAlreadyTaken,
    /// 833
    CommunityDeleted,
    /// 1605
    ChatFull,
    /// 1613
    UserNotJoined,
    /// 1661
    LevelFiveRequiredToEnableProps,
    /// 1663
    ChatViewOnly,
    /// 2001
    AlreadyRequested,
    /// 2601
    AlreadyCheckedIn,
    /// 2611
    AlreadyUsedMonthlyRepair,
    /// 2800
    AccountAlreadyRestored,
    /// 3102
    IncorrectVerificationCode,
    /// 4300
    NotEnoughCoins,
    /// 4400
    AlreadyPlayedLottery,
    /// 4500, 4501
    CannotSendCoins,
    /// Any code not listed above
    Unknown(i64),
}

impl ApiErrorKind {
    /// Decode a numeric status code
    pub fn from_code(code: i64) -> Self {
        use ApiErrorKind::*;

        match code {
            100 => UnsupportedService,
            102 => FileTooLarge,
            103 | 104 => InvalidRequest,
            105 => InvalidSession,
            106 => AccessDenied,
            107 => UnexistentData,
            113 => MessageNeeded,
            200 => InvalidAccountOrPassword,
            210 => AccountDisabled,
            213 => InvalidEmail,
            214 => InvalidPassword,
            215 => EmailAlreadyTaken,
            216 => AccountDoesntExist,
            218 => InvalidDevice,
            219 => TooManyRequests,
            221 => CantFollowYourself,
            225 => UserUnavailable,
            229 => YouAreBanned,
            230 => UserNotMemberOfCommunity,
            240 => ReachedTitleLength,
            246 => AccountDeleted,
            249 => PhoneNumberRequired,
            251 => EmailNoPassword,
            262 => ReachedMaxTitles,
            270 => VerificationRequired,
            271 => InvalidAuthNewDeviceLink,
            291 => CommandCooldown,
            300 => BadImage,
            313 => InvalidThemepack,
            314 => InvalidVoiceNote,
            500 | 1600 => RequestedNoLongerExists,
            503 => PageRepostedTooRecently,
            551 => InsufficientLevel,
            702 => WallCommentingDisabled,
            801 => CommunityNoLongerExists,
            802 => InvalidCodeOrLink,
            805 => CommunityNameAlreadyTaken,
            833 => CommunityDeleted,
            1605 => ChatFull,
            1613 => UserNotJoined,
            1661 => LevelFiveRequiredToEnableProps,
            1663 => ChatViewOnly,
            2001 => AlreadyRequested,
            2601 => AlreadyCheckedIn,
            2611 => AlreadyUsedMonthlyRepair,
            2800 => AccountAlreadyRestored,
            3102 => IncorrectVerificationCode,
            4300 => NotEnoughCoins,
            4400 => AlreadyPlayedLottery,
            4500 | 4501 => CannotSendCoins,
            other => Unknown(other),
        }
    }

    /// Whether the code is one this crate knows a name for
    pub fn is_known(&self) -> bool {
        !matches!(self, ApiErrorKind::Unknown(_))
    }

    /// Whether the session has to be re-established before retrying
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::InvalidSession | ApiErrorKind::VerificationRequired
        )
    }
}

/// A failed REST call as reported by the service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Decoded status
    pub kind: ApiErrorKind,
    /// HTTP status of the response
    pub http_status: u16,
    /// Raw `api:statuscode`, or 0 when the body had none
    pub code: i64,
    /// The service's `api:message`, if any
    pub message: String,
    /// The full response body
    pub payload: Value,
}

impl ApiError {
    /// Build an error from a decoded failure body
    pub fn from_payload(http_status: u16, payload: Value) -> Self {
        let code = payload
            .get(STATUS_CODE_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let message = payload
            .get(STATUS_MESSAGE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            kind: ApiErrorKind::from_code(code),
            http_status,
            code,
            message,
            payload,
        }
    }

    /// Build an error from a failure body that was not JSON
    pub fn from_text(http_status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::Unknown(0),
            http_status,
            code: 0,
            message: body.to_string(),
            payload: Value::String(body.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API error {} (HTTP {}, {:?}): {}",
            self.code, self.http_status, self.kind, self.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_code_known() {
        assert_eq!(ApiErrorKind::from_code(225), ApiErrorKind::UserUnavailable);
        assert_eq!(ApiErrorKind::from_code(1605), ApiErrorKind::ChatFull);
        assert_eq!(ApiErrorKind::from_code(270), ApiErrorKind::VerificationRequired);
    }

    #[test]
    fn test_from_code_shared_codes() {
        assert_eq!(ApiErrorKind::from_code(103), ApiErrorKind::InvalidRequest);
        assert_eq!(ApiErrorKind::from_code(104), ApiErrorKind::InvalidRequest);
        assert_eq!(ApiErrorKind::from_code(500), ApiErrorKind::RequestedNoLongerExists);
        assert_eq!(ApiErrorKind::from_code(1600), ApiErrorKind::RequestedNoLongerExists);
        assert_eq!(ApiErrorKind::from_code(4501), ApiErrorKind::CannotSendCoins);
    }

    #[test]
    fn test_from_code_unknown() {
        let kind = ApiErrorKind::from_code(9999);
        assert_eq!(kind, ApiErrorKind::Unknown(9999));
        assert!(!kind.is_known());
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiErrorKind::InvalidSession.requires_login());
        assert!(!ApiErrorKind::ChatFull.requires_login());
    }

    #[test]
    fn test_api_error_from_payload() {
        let err = ApiError::from_payload(
            400,
            json!({"api:statuscode": 833, "api:message": "Community deleted"}),
        );
        assert_eq!(err.kind, ApiErrorKind::CommunityDeleted);
        assert_eq!(err.code, 833);
        assert_eq!(err.http_status, 400);
        assert_eq!(err.message, "Community deleted");
    }

    #[test]
    fn test_api_error_missing_code() {
        let err = ApiError::from_payload(500, json!({"unexpected": true}));
        assert_eq!(err.code, 0);
        assert_eq!(err.kind, ApiErrorKind::Unknown(0));
        assert_eq!(err.payload["unexpected"], true);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::from_payload(400, json!({"api:statuscode": 106, "api:message": "Denied"}));
        let display = err.to_string();
        assert!(display.contains("106"));
        assert!(display.contains("AccessDenied"));
        assert!(display.contains("Denied"));
    }
}
