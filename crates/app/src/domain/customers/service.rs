//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::customers::{
        data::{GuestDetails, NewCustomer, SignupForm},
        errors::CustomersServiceError,
        password::{generate_password, hash_password, verify_password},
        records::{CustomerId, CustomerRecord},
        repository::PgCustomersRepository,
        validation::{ValidationError, validate_signup},
    },
    sessions::SessionKey,
};

/// First name given to guest customers who leave the field blank.
pub const GUEST_FIRST_NAME: &str = "Customer";

/// Email address that identifies the guest customer of a session.
#[must_use]
pub fn guest_email(session_key: &SessionKey) -> String {
    format!("guest-{}@guest.com", session_key.as_str())
}

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.find_by_email(&mut tx, email).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn get_customer(
        &self,
        customer: CustomerId,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn exists(&self, email: &str) -> Result<bool, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let exists = self.repository.exists(&mut tx, email).await?;

        tx.commit().await?;

        Ok(exists)
    }

    async fn register(&self, form: SignupForm) -> Result<CustomerRecord, CustomersServiceError> {
        let valid = validate_signup(&form)?;

        let mut tx = self.db.begin().await?;

        if self.repository.exists(&mut tx, valid.email).await? {
            return Err(ValidationError::EmailTaken.into());
        }

        let customer = NewCustomer {
            first_name: valid.first_name.to_string(),
            last_name: valid.last_name.to_string(),
            address: valid.address.map(str::to_string),
            phone: valid.phone.to_string(),
            email: valid.email.to_string(),
            password_hash: hash_password(valid.password)?,
        };

        let created = match self.repository.create_customer(&mut tx, customer).await {
            Ok(created) => created,
            Err(error) => {
                return Err(match CustomersServiceError::from(error) {
                    CustomersServiceError::AlreadyExists => ValidationError::EmailTaken.into(),
                    other => other,
                });
            }
        };

        tx.commit().await?;

        info!(customer_id = %created.id, "registered customer");

        Ok(created)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let Some(customer) = self.find_by_email(email).await? else {
            debug!("login attempt for unknown email");

            return Err(CustomersServiceError::InvalidCredentials);
        };

        if !verify_password(password, &customer.password_hash)? {
            debug!(customer_id = %customer.id, "login attempt with wrong password");

            return Err(CustomersServiceError::InvalidCredentials);
        }

        Ok(customer)
    }

    async fn find_or_create_guest(
        &self,
        session_key: &SessionKey,
        details: GuestDetails,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let email = guest_email(session_key);

        let mut tx = self.db.begin().await?;

        if let Some(existing) = self.repository.find_by_email(&mut tx, &email).await? {
            tx.commit().await?;

            return Ok(existing);
        }

        let password = details.password.filter(|password| !password.is_empty());
        let password_hash = match password {
            Some(password) => hash_password(&password)?,
            None => hash_password(&generate_password())?,
        };

        let customer = NewCustomer {
            first_name: details
                .first_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| GUEST_FIRST_NAME.to_string()),
            last_name: details.last_name.unwrap_or_default(),
            address: details.address.filter(|address| !address.is_empty()),
            phone: details.phone.unwrap_or_default(),
            email: email.clone(),
            password_hash,
        };

        // A row inserted concurrently is invisible to the upsert's snapshot.
        let guest = match self
            .repository
            .find_or_create_customer(&mut tx, customer)
            .await
        {
            Ok(guest) => guest,
            Err(sqlx::Error::RowNotFound) => self
                .repository
                .find_by_email(&mut tx, &email)
                .await?
                .ok_or(CustomersServiceError::NotFound)?,
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        debug!(customer_id = %guest.id, "resolved guest customer");

        Ok(guest)
    }

    async fn find_guest(
        &self,
        session_key: &SessionKey,
    ) -> Result<Option<CustomerRecord>, CustomersServiceError> {
        self.find_by_email(&guest_email(session_key)).await
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Look a customer up by email; a miss is `Ok(None)`.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CustomerRecord>, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerId,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Whether any customer uses `email`.
    async fn exists(&self, email: &str) -> Result<bool, CustomersServiceError>;

    /// Validate a sign-up form and store the customer with a hashed password.
    ///
    /// Only the first failing rule is reported.
    async fn register(&self, form: SignupForm) -> Result<CustomerRecord, CustomersServiceError>;

    /// Check an email and password pair.
    ///
    /// Unknown emails and wrong passwords both yield `InvalidCredentials`.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// The guest customer for a session, created from `details` on first use.
    async fn find_or_create_guest(
        &self,
        session_key: &SessionKey,
        details: GuestDetails,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// The guest customer for a session, if one was ever created.
    async fn find_guest(
        &self,
        session_key: &SessionKey,
    ) -> Result<Option<CustomerRecord>, CustomersServiceError>;
}
