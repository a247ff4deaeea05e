use std::fmt;

use super::AuthState;

/// Client-side routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    ForgotPassword,
    UpdatePassword,
    Dashboard,
    Routines,
    Exercises,
    History,
    Progress,
    Stats,
    Coach,
    Profile,
    Train {
        routine_id: String,
        day_number: Option<u8>,
    },
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session state not known yet, render nothing
    Wait,
    Render(Route),
    Redirect(Route),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["update-password"] => Route::UpdatePassword,
            ["dashboard"] => Route::Dashboard,
            ["rutinas"] => Route::Routines,
            ["biblioteca"] => Route::Exercises,
            ["historial"] => Route::History,
            ["progreso"] => Route::Progress,
            ["estadisticas"] => Route::Stats,
            ["coach"] => Route::Coach,
            ["perfil"] => Route::Profile,
            ["entrenar", id] => Route::Train {
                routine_id: id.to_string(),
                day_number: None,
            },
            ["entrenar", id, day] => match day.parse() {
                Ok(day) => Route::Train {
                    routine_id: id.to_string(),
                    day_number: Some(day),
                },
                Err(_) => Route::Unknown(path.to_string()),
            },
            _ => Route::Unknown(path.to_string()),
        }
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::Register | Route::ForgotPassword | Route::UpdatePassword
        )
    }

    /// One guard step for this route
    pub fn guard(&self, state: &AuthState) -> GuardDecision {
        match self {
            Route::Root => GuardDecision::Redirect(Route::Login),
            Route::Unknown(_) => GuardDecision::Redirect(Route::Dashboard),
            route if route.is_public() => GuardDecision::Render(route.clone()),
            route => match state {
                AuthState::Loading => GuardDecision::Wait,
                AuthState::Unauthenticated => GuardDecision::Redirect(Route::Login),
                AuthState::Authenticated(_) => GuardDecision::Render(route.clone()),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::ForgotPassword => write!(f, "/forgot-password"),
            Route::UpdatePassword => write!(f, "/update-password"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Routines => write!(f, "/rutinas"),
            Route::Exercises => write!(f, "/biblioteca"),
            Route::History => write!(f, "/historial"),
            Route::Progress => write!(f, "/progreso"),
            Route::Stats => write!(f, "/estadisticas"),
            Route::Coach => write!(f, "/coach"),
            Route::Profile => write!(f, "/perfil"),
            Route::Train {
                routine_id,
                day_number: None,
            } => write!(f, "/entrenar/{}", routine_id),
            Route::Train {
                routine_id,
                day_number: Some(day),
            } => write!(f, "/entrenar/{}/{}", routine_id, day),
            Route::Unknown(path) => write!(f, "{}", path),
        }
    }
}

/// Follow redirects until a route renders or the guard has to wait
pub fn navigate(path: &str, state: &AuthState) -> GuardDecision {
    let mut route = Route::parse(path);

    // Redirect targets are always known routes, so chains are short
    for _ in 0..4 {
        match route.guard(state) {
            GuardDecision::Redirect(next) => route = next,
            decision => return decision,
        }
    }
    GuardDecision::Render(route)
}
