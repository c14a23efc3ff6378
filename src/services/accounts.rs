//! Local user registry and the current session.
//!
//! The store is loaded once from local storage and persists on every mutation. The session
//! is a snapshot of one entry in the user list and is rewritten whenever that entry changes.

use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::models::{NewOrder, Order, OrderStatus, ProfileUpdate, SignupRequest, UserAccount};
use crate::storage::{keys, LocalStorage, PersistedCollection, PersistedValue};

const ORDER_ID_PREFIX: &str = "ORD";

pub struct UserAccountStore {
    users_store: PersistedCollection<UserAccount>,
    session_store: PersistedValue<UserAccount>,
    users: Vec<UserAccount>,
    current: Option<UserAccount>,
}

impl UserAccountStore {
    /// Load the user list and session from storage.
    ///
    /// A stored session whose user is no longer in the list is dropped; otherwise it is
    /// refreshed from the list entry.
    pub async fn load(storage: LocalStorage) -> Self {
        let users_store = PersistedCollection::new(storage.clone(), keys::USERS);
        let session_store = PersistedValue::new(storage, keys::CURRENT_USER);

        let users: Vec<UserAccount> = users_store.read().await;
        let current = session_store
            .read()
            .await
            .and_then(|session: UserAccount| users.iter().find(|u| u.id == session.id).cloned());

        tracing::info!(
            "Loaded {} user accounts (session: {})",
            users.len(),
            current.as_ref().map(|u| u.email.as_str()).unwrap_or("none")
        );

        Self {
            users_store,
            session_store,
            users,
            current,
        }
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.current.as_ref()
    }

    pub fn find_by_id(&self, user_id: &str) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Register a new account. Does not log it in.
    pub async fn signup(&mut self, request: SignupRequest) -> Result<UserAccount, AppError> {
        validate_signup(&request)?;

        if self.users.iter().any(|u| u.email == request.email) {
            return Err(AppError::duplicate_email());
        }

        let id = unique_id("", |candidate| {
            self.users.iter().any(|u| u.id == candidate)
        });
        let user = UserAccount {
            id,
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
            created_at: Utc::now().to_rfc3339(),
            orders: Vec::new(),
        };

        let mut users = self.users.clone();
        users.push(user.clone());
        self.users_store.write(&users).await?;
        self.users = users;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Start a session for the account matching both fields exactly.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserAccount, AppError> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && constant_time_compare(&u.password, password))
            .cloned()
            .ok_or_else(AppError::invalid_credentials)?;

        self.session_store.write(&user).await?;
        self.current = Some(user.clone());

        tracing::info!("User {} logged in", user.id);
        Ok(user)
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.session_store.clear().await?;
        if let Some(user) = self.current.take() {
            tracing::info!("User {} logged out", user.id);
        }
        Ok(())
    }

    /// Apply a field-level update to one account.
    pub async fn update_profile(
        &mut self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserAccount, AppError> {
        let index = self.index_of(user_id)?;

        if let Some(email) = &update.email {
            if email.trim().is_empty() {
                return Err(AppError::Validation("Email is required".to_string()));
            }
            if self.users.iter().any(|u| u.id != user_id && &u.email == email) {
                return Err(AppError::duplicate_email());
            }
        }
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if matches!(&update.password, Some(password) if password.is_empty()) {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let mut users = self.users.clone();
        let user = &mut users[index];
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = update.address {
            user.address = Some(address);
        }
        let updated = user.clone();

        self.commit_user_change(users, &updated).await?;
        Ok(updated)
    }

    /// Record a new pending order at the front of the user's order list.
    pub async fn add_order(&mut self, user_id: &str, order: NewOrder) -> Result<Order, AppError> {
        let index = self.index_of(user_id)?;

        let mut users = self.users.clone();
        let user = &mut users[index];
        let id = unique_id(ORDER_ID_PREFIX, |candidate| {
            user.orders.iter().any(|o| o.id == candidate)
        });
        let new_order = Order {
            id,
            items: order.items,
            total: order.total,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            date: Utc::now().to_rfc3339(),
            status: OrderStatus::Pending,
        };
        user.orders.insert(0, new_order.clone());
        let updated = user.clone();

        self.commit_user_change(users, &updated).await?;
        tracing::info!(
            "Order {} placed for user {} ({})",
            new_order.id,
            user_id,
            new_order.status.as_str()
        );
        Ok(new_order)
    }

    fn index_of(&self, user_id: &str) -> Result<usize, AppError> {
        self.users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(AppError::user_not_found)
    }

    /// Persist the list, then mirror the changed user into the session if it is logged in.
    async fn commit_user_change(
        &mut self,
        users: Vec<UserAccount>,
        updated: &UserAccount,
    ) -> Result<(), AppError> {
        self.users_store.write(&users).await?;
        self.users = users;

        if self.current.as_ref().is_some_and(|c| c.id == updated.id) {
            self.session_store.write(updated).await?;
            self.current = Some(updated.clone());
        }
        Ok(())
    }
}

fn validate_signup(request: &SignupRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Millisecond timestamp id, bumped until it does not collide.
fn unique_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{}{}", prefix, millis);
        if !taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
