//! Typed failures of the remote bot API.
//!
//! The remote side reports a failure as a status code plus a machine
//! description string. [`classify`] maps that pair onto one concrete
//! [`ApiError`]; descriptions the rule table does not recognize degrade to
//! the generic kind for their status class, carrying the raw text, so no
//! failure is ever unclassifiable.

use std::fmt;

/// Coarse bucket of a failing status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    BadRequest,
    Forbidden,
    /// Anything outside the classified 4xx space; keeps the raw code.
    Other(u16),
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            403 => StatusClass::Forbidden,
            400..=499 => StatusClass::BadRequest,
            other => StatusClass::Other(other),
        }
    }
}

/// Chat kinds a method is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatScope {
    Supergroup,
    SupergroupOrChannel,
}

impl ChatScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatScope::Supergroup => "supergroup",
            ChatScope::SupergroupOrChannel => "supergroup_or_channel",
        }
    }
}

impl fmt::Display for ChatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete failure kind of the remote API.
///
/// Callers pattern-match on this to pick targeted handling: suppress
/// [`ApiError::MessageNotModified`] as a no-op, surface
/// [`ApiError::ChatNotFound`] as a configuration problem, and so on. The
/// generic kinds at the bottom keep the raw description so an unrecognized
/// remote failure loses no information.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("chat not found")]
    ChatNotFound,

    #[error("user id is invalid")]
    InvalidUserId,

    #[error("message is not modified")]
    MessageNotModified,

    #[error("phone number can be requested in private chats only")]
    ContactRequestNotAllowed,

    #[error("method is available only for {required} chats")]
    WrongChatType { required: ChatScope },

    #[error("required parameter `{parameter}` is missing")]
    MissingParameter { parameter: String },

    #[error("parameter `{parameter}` is invalid")]
    InvalidParameter { parameter: String },

    #[error("bot can't initiate conversation with a user")]
    ChatNotInitiated,

    #[error("bot was blocked by the user")]
    BotBlocked,

    /// Unrecognized bad-request failure.
    #[error("bad request: {description}")]
    BadRequest { description: String },

    /// Unrecognized forbidden failure.
    #[error("forbidden: {description}")]
    Forbidden { description: String },

    /// Failure outside the classified status classes.
    #[error("api error (status {code}): {description}")]
    Api { code: u16, description: String },
}

impl ApiError {
    /// The status class this kind belongs to.
    pub fn status_class(&self) -> StatusClass {
        match self {
            ApiError::ChatNotInitiated | ApiError::BotBlocked | ApiError::Forbidden { .. } => {
                StatusClass::Forbidden
            }
            ApiError::Api { code, .. } => StatusClass::Other(*code),
            _ => StatusClass::BadRequest,
        }
    }
}

/// How a rule matches a description.
enum Pattern {
    /// The whole description, verbatim.
    Exact(&'static str),
    /// Fixed template `"<parameter><suffix>"`; the leading segment is the
    /// captured parameter name.
    Suffix(&'static str),
}

struct Rule {
    pattern: Pattern,
    build: fn(&str) -> ApiError,
}

impl Rule {
    fn apply(&self, description: &str) -> Option<ApiError> {
        match self.pattern {
            Pattern::Exact(text) => (description == text).then(|| (self.build)(description)),
            Pattern::Suffix(suffix) => description
                .strip_suffix(suffix)
                .filter(|head| !head.is_empty())
                .map(|head| (self.build)(head)),
        }
    }
}

// Ordered: specific rules first, templates after, the generic fallback is
// applied by `classify` when nothing here matches.
const BAD_REQUEST_RULES: &[Rule] = &[
    Rule {
        pattern: Pattern::Exact("chat not found"),
        build: |_| ApiError::ChatNotFound,
    },
    Rule {
        pattern: Pattern::Exact("USER_ID_INVALID"),
        build: |_| ApiError::InvalidUserId,
    },
    Rule {
        pattern: Pattern::Exact("message is not modified"),
        build: |_| ApiError::MessageNotModified,
    },
    Rule {
        pattern: Pattern::Exact("phone number can be requested in a private chats only"),
        build: |_| ApiError::ContactRequestNotAllowed,
    },
    Rule {
        pattern: Pattern::Exact("method is available only for supergroups"),
        build: |_| ApiError::WrongChatType {
            required: ChatScope::Supergroup,
        },
    },
    Rule {
        pattern: Pattern::Exact("method is available for supergroup and channel chats only"),
        build: |_| ApiError::WrongChatType {
            required: ChatScope::SupergroupOrChannel,
        },
    },
    Rule {
        pattern: Pattern::Suffix(" is empty"),
        build: |parameter| ApiError::MissingParameter {
            parameter: parameter.to_string(),
        },
    },
    Rule {
        pattern: Pattern::Suffix(" parameter is missing"),
        build: |parameter| ApiError::MissingParameter {
            parameter: parameter.to_string(),
        },
    },
    Rule {
        pattern: Pattern::Suffix(" is invalid"),
        build: |parameter| ApiError::InvalidParameter {
            parameter: parameter.to_string(),
        },
    },
];

const FORBIDDEN_RULES: &[Rule] = &[
    Rule {
        pattern: Pattern::Exact("bot can't initiate conversation with a user"),
        build: |_| ApiError::ChatNotInitiated,
    },
    Rule {
        pattern: Pattern::Exact("bot was blocked by the user"),
        build: |_| ApiError::BotBlocked,
    },
];

/// Map a failure response onto one concrete error kind.
///
/// Total and deterministic: rules are evaluated top to bottom within the
/// status class, first match wins, and every class has a generic fallback
/// carrying the untouched description. Pure; performs no I/O and keeps no
/// state, so it is safe from any number of concurrent callers.
pub fn classify(status: StatusClass, description: &str) -> ApiError {
    let rules: &[Rule] = match status {
        StatusClass::BadRequest => BAD_REQUEST_RULES,
        StatusClass::Forbidden => FORBIDDEN_RULES,
        StatusClass::Other(_) => &[],
    };

    for rule in rules {
        if let Some(err) = rule.apply(description) {
            return err;
        }
    }

    match status {
        StatusClass::BadRequest => ApiError::BadRequest {
            description: description.to_string(),
        },
        StatusClass::Forbidden => ApiError::Forbidden {
            description: description.to_string(),
        },
        StatusClass::Other(code) => ApiError::Api {
            code,
            description: description.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_class_derivation() {
        assert_eq!(StatusClass::from_code(400), StatusClass::BadRequest);
        assert_eq!(StatusClass::from_code(403), StatusClass::Forbidden);
        assert_eq!(StatusClass::from_code(404), StatusClass::BadRequest);
        assert_eq!(StatusClass::from_code(499), StatusClass::BadRequest);
        assert_eq!(StatusClass::from_code(500), StatusClass::Other(500));
        assert_eq!(StatusClass::from_code(302), StatusClass::Other(302));
    }

    #[test]
    fn known_bad_request_descriptions() {
        assert_eq!(
            classify(StatusClass::BadRequest, "chat not found"),
            ApiError::ChatNotFound
        );
        assert_eq!(
            classify(StatusClass::BadRequest, "USER_ID_INVALID"),
            ApiError::InvalidUserId
        );
        assert_eq!(
            classify(StatusClass::BadRequest, "message is not modified"),
            ApiError::MessageNotModified
        );
        assert_eq!(
            classify(
                StatusClass::BadRequest,
                "phone number can be requested in a private chats only"
            ),
            ApiError::ContactRequestNotAllowed
        );
    }

    #[test]
    fn chat_type_restrictions() {
        assert_eq!(
            classify(
                StatusClass::BadRequest,
                "method is available only for supergroups"
            ),
            ApiError::WrongChatType {
                required: ChatScope::Supergroup
            }
        );
        assert_eq!(
            classify(
                StatusClass::BadRequest,
                "method is available for supergroup and channel chats only"
            ),
            ApiError::WrongChatType {
                required: ChatScope::SupergroupOrChannel
            }
        );
    }

    #[test]
    fn parameter_templates_capture_the_name() {
        assert_eq!(
            classify(StatusClass::BadRequest, "message text is empty"),
            ApiError::MissingParameter {
                parameter: "message text".to_string()
            }
        );
        assert_eq!(
            classify(StatusClass::BadRequest, "chat_id parameter is missing"),
            ApiError::MissingParameter {
                parameter: "chat_id".to_string()
            }
        );
        assert_eq!(
            classify(StatusClass::BadRequest, "inline_query_id is invalid"),
            ApiError::InvalidParameter {
                parameter: "inline_query_id".to_string()
            }
        );
        // A bare template with no leading segment names no parameter.
        assert_eq!(
            classify(StatusClass::BadRequest, " is empty"),
            ApiError::BadRequest {
                description: " is empty".to_string()
            }
        );
    }

    #[test]
    fn known_forbidden_descriptions() {
        assert_eq!(
            classify(
                StatusClass::Forbidden,
                "bot can't initiate conversation with a user"
            ),
            ApiError::ChatNotInitiated
        );
        assert_eq!(
            classify(StatusClass::Forbidden, "bot was blocked by the user"),
            ApiError::BotBlocked
        );
    }

    #[test]
    fn unmatched_text_degrades_to_the_class_fallback() {
        assert_eq!(
            classify(StatusClass::BadRequest, "some new undocumented failure"),
            ApiError::BadRequest {
                description: "some new undocumented failure".to_string()
            }
        );
        assert_eq!(
            classify(StatusClass::Forbidden, "bot was kicked from the group chat"),
            ApiError::Forbidden {
                description: "bot was kicked from the group chat".to_string()
            }
        );
        assert_eq!(
            classify(StatusClass::Other(500), "internal server error"),
            ApiError::Api {
                code: 500,
                description: "internal server error".to_string()
            }
        );
    }

    #[test]
    fn specific_rules_win_over_fallbacks() {
        // "chat not found" is also a perfectly fine generic description;
        // the specific kind must win.
        let got = classify(StatusClass::BadRequest, "chat not found");
        assert_ne!(
            got,
            ApiError::BadRequest {
                description: "chat not found".to_string()
            }
        );
        // Forbidden-class text never leaks into the bad-request rules.
        assert_eq!(
            classify(StatusClass::BadRequest, "bot was blocked by the user"),
            ApiError::BadRequest {
                description: "bot was blocked by the user".to_string()
            }
        );
    }

    #[test]
    fn classification_is_deterministic() {
        for desc in ["chat not found", "x is empty", "anything else at all", ""] {
            assert_eq!(
                classify(StatusClass::BadRequest, desc),
                classify(StatusClass::BadRequest, desc)
            );
        }
    }

    #[test]
    fn kinds_report_their_status_class() {
        assert_eq!(ApiError::ChatNotFound.status_class(), StatusClass::BadRequest);
        assert_eq!(ApiError::BotBlocked.status_class(), StatusClass::Forbidden);
        assert_eq!(
            ApiError::Api {
                code: 502,
                description: String::new()
            }
            .status_class(),
            StatusClass::Other(502)
        );
    }
}
