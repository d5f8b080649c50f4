use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use relay::{Role, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, PartialEq)]
pub enum ProfileError {
    DuplicateUserId,
    DuplicateEmail,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::DuplicateUserId => write!(f, "user id is already registered"),
            ProfileError::DuplicateEmail => write!(f, "email is already registered"),
        }
    }
}

/// In-memory profile records, keyed by user id. User ids and emails are
/// unique. Storage is irrelevant to relay correctness, so profiles live and
/// die with the process.
pub struct ProfileStore {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, new: NewUserProfile) -> Result<UserProfile, ProfileError> {
        let mut profiles = self.profiles.write().expect("profile store lock poisoned");
        if profiles.contains_key(&new.user_id) {
            return Err(ProfileError::DuplicateUserId);
        }
        if profiles.values().any(|profile| profile.email == new.email) {
            return Err(ProfileError::DuplicateEmail);
        }

        let profile = UserProfile {
            user_id: new.user_id.clone(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            birth_date: new.birth_date,
            phone_number: new.phone_number,
            role: new.role,
            created_at: Utc::now(),
        };
        profiles.insert(new.user_id, profile.clone());
        Ok(profile)
    }

    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        let profiles = self.profiles.read().expect("profile store lock poisoned");
        profiles.get(user_id).cloned()
    }
}
