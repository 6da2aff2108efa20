//! Registration, login, and profile handlers.

use actix_web::{HttpResponse, web};

use tribune_core::domain::{NewUser, User};
use tribune_shared::dto::{
    AuthResponse, LoginRequest, RegisterUserRequest, UpdateProfileRequest, UserResponse,
};

use crate::middleware::auth::Authenticated;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.login.is_empty() {
        return Err(AppError::BadRequest("Login must not be empty".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check for existing accounts
    if state.users.find_by_login(&req.login).await?.is_some() {
        return Err(AppError::BadRequest(
            "User with this login already exists".to_string(),
        ));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already in use".to_string()));
    }

    // Hash password
    let password_hash = state.passwords.hash(&req.password)?;

    let user = state
        .users
        .create(NewUser {
            login: req.login,
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth: req.date_of_birth,
            phone: req.phone,
        })
        .await?;

    tracing::info!(user_id = user.id, "Registered new user");
    Ok(HttpResponse::Created().json(to_profile(user)))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // A missing account and a wrong password produce the same answer.
    let user = match state.users.find_by_login(&req.login).await? {
        Some(user) => user,
        None => {
            return Err(AppError::BadRequest(
                "Incorrect login or password".to_string(),
            ));
        }
    };

    let valid = state.passwords.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::BadRequest(
            "Incorrect login or password".to_string(),
        ));
    }

    let token = state.tokens.generate_token(user.id, &user.login)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// GET /profile - the verification endpoint the gateway calls; `id` in the
/// response is the subject the gateway extracts.
pub async fn profile(state: web::Data<AppState>, caller: Authenticated) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(to_profile(user)))
}

/// PUT /profile - partial update; omitted fields keep their value.
pub async fn update_profile(
    state: web::Data<AppState>,
    caller: Authenticated,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if let Some(email) = req.email {
        if let Some(existing) = state.users.find_by_email(&email).await? {
            if existing.id != user.id {
                return Err(AppError::BadRequest("Email already in use".to_string()));
            }
        }
        user.email = email;
    }
    if let Some(first_name) = req.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(last_name) = req.last_name {
        user.last_name = Some(last_name);
    }
    if let Some(date_of_birth) = req.date_of_birth {
        user.date_of_birth = Some(date_of_birth);
    }
    if let Some(phone) = req.phone {
        user.phone = Some(phone);
    }

    let user = state.users.update(user).await?;
    Ok(HttpResponse::Ok().json(to_profile(user)))
}

fn to_profile(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        login: user.login,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        date_of_birth: user.date_of_birth,
        phone: user.phone,
        created_at: user.created_at.to_rfc3339(),
        updated_at: user.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::http::header;
    use actix_web::{App, test, web};
    use async_trait::async_trait;

    use tribune_core::domain::{NewUser, User};
    use tribune_core::error::RepoError;
    use tribune_core::ports::UserRepository;
    use tribune_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
    use tribune_shared::dto::{AuthResponse, UserResponse};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    /// User store over a plain vector, ids assigned in insertion order.
    #[derive(Default)]
    struct MemoryUsers {
        rows: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MemoryUsers {
        async fn create(&self, user: NewUser) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let now = chrono::Utc::now();
            let user = User {
                id: rows.len() as i64 + 1,
                login: user.login,
                email: user.email,
                password_hash: user.password_hash,
                first_name: user.first_name,
                last_name: user.last_name,
                date_of_birth: user.date_of_birth,
                phone: user.phone,
                created_at: now,
                updated_at: now,
            };
            rows.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.id == id)
                .cloned())
        }

        async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.login == login)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.email == email)
                .cloned())
        }

        async fn update(&self, mut user: User) -> Result<User, RepoError> {
            user.updated_at = chrono::Utc::now();
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|row| row.id == user.id) {
                Some(row) => {
                    *row = user.clone();
                    Ok(user)
                }
                None => Err(RepoError::NotFound),
            }
        }
    }

    fn test_state() -> AppState {
        AppState {
            users: Arc::new(MemoryUsers::default()),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret-key".to_string(),
                expiration_minutes: 30,
                issuer: "test-issuer".to_string(),
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    fn register_payload() -> serde_json::Value {
        serde_json::json!({
            "login": "alice",
            "email": "alice@example.com",
            "password": "secure_password_123"
        })
    }

    #[actix_web::test]
    async fn register_login_and_fetch_the_profile() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register_payload())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let registered: UserResponse = test::read_body_json(resp).await;
        assert_eq!(registered.id, 1);
        assert_eq!(registered.login, "alice");

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(serde_json::json!({
                    "login": "alice",
                    "password": "secure_password_123"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let auth: AuthResponse = test::read_body_json(resp).await;
        assert_eq!(auth.token_type, "bearer");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .insert_header((
                    header::AUTHORIZATION,
                    format!("Bearer {}", auth.access_token),
                ))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let profile: UserResponse = test::read_body_json(resp).await;
        assert_eq!(profile.id, 1);
        assert_eq!(profile.email, "alice@example.com");
    }

    #[actix_web::test]
    async fn a_wrong_password_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register_payload())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(serde_json::json!({
                    "login": "alice",
                    "password": "not-the-password"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn a_duplicate_login_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register_payload())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register_payload())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn the_profile_requires_a_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/profile").to_request())
            .await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn updating_the_profile_keeps_omitted_fields() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register_payload())
                .to_request(),
        )
        .await;
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(serde_json::json!({
                    "login": "alice",
                    "password": "secure_password_123"
                }))
                .to_request(),
        )
        .await;
        let auth: AuthResponse = test::read_body_json(resp).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/profile")
                .insert_header((
                    header::AUTHORIZATION,
                    format!("Bearer {}", auth.access_token),
                ))
                .set_json(serde_json::json!({ "first_name": "Alice" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let profile: UserResponse = test::read_body_json(resp).await;
        assert_eq!(profile.first_name.as_deref(), Some("Alice"));
        assert_eq!(profile.email, "alice@example.com");
    }
}
