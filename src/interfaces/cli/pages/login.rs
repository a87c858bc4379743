use std::io::{BufRead, Write};

use tracing::warn;

use super::{dashboard, navigate};
use crate::domain::error::Result;
use crate::interfaces::cli::router::Route;
use crate::interfaces::cli::state::ConsoleState;

const SOURCE: &str = "login";

fn prompt(input: &mut dyn BufRead, out: &mut dyn Write, label: &str) -> Result<String> {
    write!(out, "{}: ", label)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

pub async fn login(
    state: &ConsoleState,
    username: Option<String>,
    password: Option<String>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt(input, out, "Username")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt(input, out, "Password")?,
    };

    if let Err(err) = state.session.login(&username, &password).await {
        warn!(username = %username, error = %err, "Login rejected");
        state.toasts.error(SOURCE, "Invalid username or password");
        return Ok(());
    }

    navigate(out, &Route::Dashboard)?;
    dashboard::render(state, out).await
}

pub fn logout(state: &ConsoleState, out: &mut dyn Write) -> Result<()> {
    state.session.logout()?;
    state.toasts.info(SOURCE, "Logged out");
    navigate(out, &Route::Login)
}

pub fn status(state: &ConsoleState, out: &mut dyn Write) -> Result<()> {
    if state.session.is_authenticated() {
        writeln!(out, "Authenticated against {}", state.api_base)?;
    } else {
        writeln!(out, "Not authenticated. Run: login")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fake_api::{sample_endpoint, FakeConsoleApi};
    use crate::infrastructure::security::{MemoryTokenStore, TokenStore};
    use crate::interfaces::cli::notify::ToastLevel;
    use crate::interfaces::cli::pages::testing::{text, toasts};
    use std::io::Cursor;
    use std::sync::Arc;

    fn logged_out() -> (Arc<FakeConsoleApi>, ConsoleState) {
        let api = Arc::new(FakeConsoleApi::new());
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let state = ConsoleState::new(api.clone(), tokens, "http://api");
        (api, state)
    }

    #[tokio::test]
    async fn test_prompted_login_lands_on_dashboard() {
        let (api, state) = logged_out();
        api.add_endpoint(sample_endpoint("ep-1", "orders", "Orders"));
        let mut input = Cursor::new(b"admin\nsecret\n".to_vec());
        let mut out = Vec::new();

        login(&state, None, None, &mut input, &mut out).await.unwrap();

        let text = text(out);
        assert!(text.starts_with("Username: Password: -> /"));
        assert!(text.contains("Orders"));
        assert!(state.session.is_authenticated());
        assert_eq!(api.count_calls("get_token:admin"), 1);
    }

    #[tokio::test]
    async fn test_rejected_login_shows_fixed_message() {
        let (api, state) = logged_out();
        api.fail_login();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        login(
            &state,
            Some("admin".to_string()),
            Some("wrong".to_string()),
            &mut input,
            &mut out,
        )
        .await
        .unwrap();

        assert!(out.is_empty());
        assert_eq!(
            toasts(&state),
            vec![(ToastLevel::Error, "Invalid username or password".to_string())]
        );
        assert!(!state.session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let (_api, state) = crate::interfaces::cli::pages::testing::logged_in();
        let mut out = Vec::new();
        logout(&state, &mut out).unwrap();

        assert!(!state.session.is_authenticated());
        assert_eq!(text(out), "-> /login\n\n");

        let mut out = Vec::new();
        status(&state, &mut out).unwrap();
        assert!(text(out).starts_with("Not authenticated"));
    }
}
