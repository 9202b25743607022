//! Session state carried by the caller.
//!
//! The store keeps no ambient "current user": every caller owns a
//! [`Session`] value and passes it into the auth service. Anonymous and
//! Authenticated are the only states; login and remember-me resume move
//! forward, logout moves back.

use crate::model::User;

/// Per-caller session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

/// The identity snapshot held while authenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub user_id: String,
    pub alias: String,
    pub firstname: String,
    pub lastname: String,
    pub is_admin: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Authenticated(user) if user.is_admin)
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub(crate) fn establish(&mut self, user: &User) {
        *self = Session::Authenticated(SessionUser {
            user_id: user.id.clone(),
            alias: user.alias.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            is_admin: user.is_admin,
        });
    }

    pub(crate) fn clear(&mut self) {
        *self = Session::Anonymous;
    }
}
