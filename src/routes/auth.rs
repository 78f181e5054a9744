use crate::{
    auth::{
        password::{hash_password_blocking, verify_password_blocking},
        AuthResponse, LoginRequest, SignupRequest,
    },
    error::AppError,
    models::User,
    state::AppState,
    store::StoreError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Register a new user
///
/// Creates the account and answers `201` with a session token. A taken email is
/// a `400 "User already exists"`, whether it is caught by the lookup or by the
/// store's uniqueness constraint during a concurrent signup.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let SignupRequest {
        name,
        email,
        password,
    } = signup_data.into_inner();

    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest(USER_EXISTS.into()));
    }

    let password_hash = hash_password_blocking(password, state.bcrypt_cost).await?;

    let user = match state
        .users
        .create_user(User::new(name, email, password_hash))
        .await
    {
        Ok(user) => user,
        Err(StoreError::Conflict(_)) => return Err(AppError::BadRequest(USER_EXISTS.into())),
        Err(e) => return Err(e.into()),
    };

    let token = state.keys.issue(user.id)?;
    log::info!("user {} signed up", user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User created successfully".into(),
        token,
    }))
}

/// Login user
///
/// Unknown email and wrong password produce the same `400 "Invalid credentials"`.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let LoginRequest { email, password } = login_data.into_inner();

    let user = match state.users.find_user_by_email(&email).await? {
        Some(user) => user,
        None => {
            log::debug!("login rejected: no account for submitted email");
            // same bcrypt work as a password check, so timing matches a wrong password
            hash_password_blocking(password, state.bcrypt_cost).await?;
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
        }
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        log::debug!("login rejected: password mismatch for user {}", user.id);
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = state.keys.issue(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".into(),
        token,
    }))
}
