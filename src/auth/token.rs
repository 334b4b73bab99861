//! The session token kept, encrypted, in the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::UserID;

/// Who is logged in and until when.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub user_id: UserID,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::auth::{UserID, token::Token};

    #[test]
    fn expiry_is_written_as_rfc3339() {
        let token = Token {
            user_id: UserID::new(3),
            expires_at: datetime!(2026-10-19 14:30:00 UTC),
        };

        let json = serde_json::to_string(&token).unwrap();

        assert_eq!(json, r#"{"user_id":3,"expires_at":"2026-10-19T14:30:00Z"}"#);
    }

    #[test]
    fn reads_back_midnight_with_local_offset() {
        let token = Token {
            user_id: UserID::new(3),
            expires_at: datetime!(2026-10-19 00:00:00 +13:00),
        };

        let json = serde_json::to_string(&token).unwrap();
        let got: Token = serde_json::from_str(&json).unwrap();

        assert_eq!(got, token);
        assert_eq!(got.expires_at.offset(), token.expires_at.offset());
    }
}
