//! One-shot flash messages and the page context every view carries.

use serde::{Deserialize, Serialize};

use super::session::SessionContext;
use crate::domain::{Error, User};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
}

/// A message queued for the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    level: FlashLevel,
    text: String,
}

impl Flash {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn level(&self) -> FlashLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Per-request view context: the logged-in user and pending messages.
///
/// Serialises as:
///
/// ```json
/// {"currentUser": {"id": "...", "username": "colt"}, "error": [], "success": ["Welcome back, colt"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    current_user: Option<User>,
    error: Vec<String>,
    success: Vec<String>,
}

impl PageContext {
    /// Build the context, consuming any pending flash messages.
    pub fn load(session: &SessionContext) -> Result<Self, Error> {
        let current_user = session.principal()?;
        Ok(Self::from_parts(current_user, session.take_flashes()))
    }

    pub(crate) fn from_parts(current_user: Option<User>, flashes: Vec<Flash>) -> Self {
        let (error, success): (Vec<Flash>, Vec<Flash>) = flashes
            .into_iter()
            .partition(|flash| flash.level == FlashLevel::Error);
        Self {
            current_user,
            error: error.into_iter().map(|flash| flash.text).collect(),
            success: success.into_iter().map(|flash| flash.text).collect(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn flashes_split_by_level_in_order() {
        let context = PageContext::from_parts(
            None,
            vec![
                Flash::new(FlashLevel::Error, "first"),
                Flash::new(FlashLevel::Success, "saved"),
                Flash::new(FlashLevel::Error, "second"),
            ],
        );

        let value = serde_json::to_value(&context).expect("serialise context");
        assert_eq!(
            value,
            json!({"currentUser": null, "error": ["first", "second"], "success": ["saved"]})
        );
    }

    #[rstest]
    fn current_user_serialises_id_and_username() {
        let user = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "colt")
            .expect("fixture user");
        let context = PageContext::from_parts(Some(user), Vec::new());

        let value = serde_json::to_value(&context).expect("serialise context");
        assert_eq!(
            value["currentUser"],
            json!({"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "colt"})
        );
    }

    #[rstest]
    #[case(FlashLevel::Error, "error")]
    #[case(FlashLevel::Success, "success")]
    fn levels_serialise_lowercase(#[case] level: FlashLevel, #[case] expected: &str) {
        assert_eq!(serde_json::to_value(level).expect("serialise"), json!(expected));
    }
}
