use crate::storage::{Click, Link, User};
use migration::entities::{click, link, user};

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        url: model.url,
        code: model.code,
        title: model.title,
        visits: model.visits.max(0),
        created_at: model.created_at,
    }
}

pub fn model_to_click(model: click::Model) -> Click {
    Click {
        id: model.id,
        link_id: model.link_id,
        created_at: model.created_at,
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        created_at: model.created_at,
    }
}

/// ActiveModel for a fresh link: id left to the database, zero visits
pub fn new_link_active_model(url: &str, title: Option<&str>, code: &str) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        url: Set(url.to_string()),
        code: Set(code.to_string()),
        title: Set(title.map(str::to_string)),
        visits: Set(0),
        created_at: Set(chrono::Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_link_clamps_negative_visits() {
        let link = model_to_link(link::Model {
            id: 7,
            url: "https://example.com".to_string(),
            code: "abc123".to_string(),
            title: None,
            visits: -3,
            created_at: Utc::now(),
        });
        assert_eq!(link.id, 7);
        assert_eq!(link.visits, 0);
    }

    #[test]
    fn test_new_link_active_model() {
        let model = new_link_active_model("https://example.com", Some("Example"), "xyz789");
        assert!(matches!(model.id, ActiveValue::NotSet));
        assert_eq!(model.visits, ActiveValue::Set(0));
        assert_eq!(model.title, ActiveValue::Set(Some("Example".to_string())));
    }
}
