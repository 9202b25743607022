//! Authentication over the user repository.
//!
//! Registration, login, logout, and remember-me replay. The service holds
//! no session state of its own; callers pass their [`Session`] value in
//! and the service moves it between Anonymous and Authenticated.

pub mod password;
pub mod session;
pub mod token;

pub use session::{Session, SessionUser};

use chrono::Utc;

use crate::error::{Result, StoreError};
use crate::model::{NewUser, RememberToken, User};
use crate::repo::UserRepository;

/// A registration request carrying the plaintext password. The password is
/// hashed here and dropped; it is never persisted or logged.
#[derive(Debug, Clone)]
pub struct Registration {
    pub firstname: String,
    pub lastname: String,
    pub alias: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        alias: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            alias: alias.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// Uniqueness of alias/email and the first-user-admin rule are decided
    /// atomically inside the repository's create.
    pub fn register(&self, registration: Registration) -> Result<User> {
        let hash = password::hash_password(&registration.password)?;
        self.users.create(NewUser::new(
            registration.firstname,
            registration.lastname,
            registration.alias,
            registration.email,
            hash,
        ))
    }

    /// Authenticate and establish the session.
    ///
    /// An unknown alias and a wrong password both fail with
    /// [`StoreError::InvalidCredentials`], which renders as one generic
    /// message in either case. With `remember`, a fresh token is persisted
    /// onto the user record and returned for cookie storage.
    pub fn login(
        &self,
        session: &mut Session,
        alias: &str,
        plain_password: &str,
        remember: bool,
    ) -> Result<Option<RememberToken>> {
        let user = match self.users.find_by_alias(alias)? {
            Some(user) => user,
            None => return Err(StoreError::InvalidCredentials),
        };
        if !password::verify_password(plain_password, &user.password) {
            return Err(StoreError::InvalidCredentials);
        }

        session.establish(&user);

        if !remember {
            return Ok(None);
        }
        let minted = token::mint(Utc::now().timestamp())?;
        let mut updated = user;
        updated.remember_token = Some(minted.clone());
        self.users.update(&updated)?;
        Ok(Some(minted))
    }

    /// Re-establish a session from a presented remember-me cookie value.
    ///
    /// Fails closed: an expired, mismatched, or absent token leaves the
    /// session Anonymous and returns `Ok(false)`.
    pub fn resume(&self, session: &mut Session, presented: &str) -> Result<bool> {
        if presented.is_empty() {
            return Ok(false);
        }
        let now = Utc::now().timestamp();
        for user in self.users.all()? {
            let matched = user
                .remember_token
                .as_ref()
                .is_some_and(|stored| stored.token == presented && !stored.is_expired(now));
            if matched {
                session.establish(&user);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Drop back to Anonymous. The stored remember token is not scrubbed;
    /// it simply stops being presented once the caller clears its cookie.
    pub fn logout(&self, session: &mut Session) {
        session.clear();
    }
}
