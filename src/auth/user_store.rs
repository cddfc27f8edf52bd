//! User Storage
//! Mission: Fixed, read-only credential table looked up by username

use crate::auth::{
    models::{User, UserRole},
    password::{hash_password, verify_password, PasswordError},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Username of the seeded account
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password of the seeded account
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";

/// In-memory credential store, immutable once built
pub struct UserStore {
    users: HashMap<String, User>,
    // Compared against when a username is unknown so both failure paths cost one bcrypt run
    dummy_hash: String,
    lookups: AtomicU64,
}

impl UserStore {
    /// Build a store from fixed records. Later duplicates of a username are ignored.
    pub fn new(records: Vec<User>, cost: u32) -> Result<Self, PasswordError> {
        let mut users = HashMap::with_capacity(records.len());
        for user in records {
            if users.contains_key(&user.username) {
                warn!("Duplicate username {} ignored", user.username);
                continue;
            }
            users.insert(user.username.clone(), user);
        }

        let dummy_hash = hash_password("dummy-password-for-timing", cost)?;

        Ok(Self {
            users,
            dummy_hash,
            lookups: AtomicU64::new(0),
        })
    }

    /// Store seeded with the single demo administrator
    pub fn with_default_admin(cost: u32) -> Result<Self, PasswordError> {
        let admin = User {
            id: 1,
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD, cost)?,
            role: UserRole::Admin,
        };

        info!("🔐 Default admin user loaded (username: {})", admin.username);
        warn!("⚠️  Demo credentials are hardcoded - do not expose this service");

        Self::new(vec![admin], cost)
    }

    /// Get user by username
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Verify username and password, returning the matching record on success
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, PasswordError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match self.find_by_username(username) {
            Some(user) => {
                let valid = verify_password(password, &user.password_hash)?;
                Ok(valid.then(|| user.clone()))
            }
            None => {
                // Result discarded, only the elapsed time matters
                let _ = verify_password(password, &self.dummy_hash)?;
                Ok(None)
            }
        }
    }

    /// Number of credential checks served so far
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
