/// Index page: HTML listing with an add-user form
use crate::{error::Result, state::AppState};
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, Redirect},
    Form,
};
use users_core::types::{CreateUser, NewUserPayload, User};

/// GET /
pub async fn index(State(app_state): State<AppState>) -> Result<Html<String>> {
    let users = app_state.store.get_all_users().await?;
    Ok(Html(render_index(&users)))
}

/// POST /
///
/// Always redirects back to the listing; a rejected submission is only logged.
pub async fn add_user(
    State(app_state): State<AppState>,
    form: std::result::Result<Form<NewUserPayload>, FormRejection>,
) -> Redirect {
    let new_user = match form {
        Ok(Form(payload)) => CreateUser::try_from(payload).map_err(|e| e.to_string()),
        Err(rejection) => Err(rejection.body_text()),
    };

    match new_user {
        Ok(new_user) => match app_state.store.create_user(new_user).await {
            Ok(user) => tracing::info!(id = user.id, "Created user from form"),
            Err(e) => tracing::warn!("Form submission not stored: {}", e),
        },
        Err(reason) => tracing::warn!("Form submission rejected: {}", reason),
    }

    Redirect::to("/")
}

pub fn render_index(users: &[User]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n\
         <meta charset=\"utf-8\">\n<title>Todos los usuarios</title>\n</head>\n<body>\n\
         <h1>Todos los usuarios</h1>\n\
         <form action=\"/\" method=\"POST\">\n\
         <input name=\"username\" type=\"text\" placeholder=\"Ingrese un nombre de usuario\" required>\n\
         <input name=\"email\" type=\"email\" placeholder=\"Ingrese una dirección email\" required>\n\
         <input type=\"submit\" value=\"Enviar\">\n\
         </form>\n<hr>\n",
    );

    if users.is_empty() {
        html.push_str("<p>No hay usuarios!</p>\n");
    } else {
        html.push_str("<ul>\n");
        for user in users {
            html.push_str(&format!(
                "<li><strong>{}</strong> - {}</li>\n",
                escape_html(&user.username),
                escape_html(&user.email)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64, username: &str, email: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_listing() {
        let html = render_index(&[]);
        assert!(html.contains("Todos los usuarios"));
        assert!(html.contains("<p>No hay usuarios!</p>"));
    }

    #[test]
    fn test_listing_with_users() {
        let html = render_index(&[
            user(1, "abel", "abel.huanca@upeu.edu.pe"),
            user(2, "fredy", "abelthf@gmail.com"),
        ]);

        assert!(!html.contains("<p>No hay usuarios!</p>"));
        let abel = html.find("abel.huanca@upeu.edu.pe").unwrap();
        let fredy = html.find("abelthf@gmail.com").unwrap();
        assert!(abel < fredy);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_index(&[user(1, "<script>alert('x')</script>", "a&b@example.com")]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("a&amp;b@example.com"));
    }
}
