//! The rendered user list snapshot.

use crate::models::{User, UserId, UserList};

/// Latest list fetched from the repository.
///
/// Always replaced as a whole, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct UserListState {
    users: Vec<User>,
    /// Number of successful loads so far.
    generation: u64,
}

impl UserListState {
    pub fn replace(&mut self, list: UserList) {
        self.users = list.all;
        self.generation += 1;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Whether the list has been loaded at least once.
    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
