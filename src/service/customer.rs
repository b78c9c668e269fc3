//! Customer business logic

use crate::domain::{
    normalize_phone, normalize_role, Customer, RegisterCustomerInput, StringUuid,
    UpdateCustomerInput,
};
use crate::error::{AppError, Result};
use crate::repository::CustomerRepository;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use validator::Validate;

pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a new customer with zeroed balances.
    ///
    /// A phone number that is already registered surfaces as `Conflict` from the repository.
    pub async fn register(&self, input: RegisterCustomerInput) -> Result<Customer> {
        input.validate()?;

        let customer = Customer {
            phone: normalize_phone(&input.phone),
            name: input.name.trim().to_string(),
            role: normalize_role(&input.role),
            ..Default::default()
        };

        self.repo.create(&customer).await?;
        tracing::info!(customer_id = %customer.id, role = %customer.role, "Customer registered");
        Ok(customer)
    }

    /// Phone-possession login. Unknown phones are `NotFound`; the caller must not
    /// issue a token in that case.
    pub async fn authenticate(&self, phone: &str) -> Result<Customer> {
        let customer = match self.repo.find_by_phone(&normalize_phone(phone)).await? {
            Some(customer) => customer,
            None => {
                counter!("miniature_auth_login_total", "result" => "unknown_phone").increment(1);
                return Err(AppError::NotFound("No customer with this phone".to_string()));
            }
        };

        if !customer.is_active {
            counter!("miniature_auth_login_total", "result" => "inactive").increment(1);
            return Err(AppError::Forbidden("Customer account is inactive".to_string()));
        }

        counter!("miniature_auth_login_total", "result" => "success").increment(1);
        Ok(customer)
    }

    pub async fn get(&self, id: StringUuid) -> Result<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))
    }

    /// Apply a partial update. Identity checks are the caller's responsibility.
    pub async fn update(&self, id: StringUuid, input: UpdateCustomerInput) -> Result<Customer> {
        input.validate()?;

        let mut customer = self.get(id).await?;
        customer.apply(&input);
        customer.updated_at = Utc::now();

        self.repo.update(&customer).await?;
        customer.version += 1;
        Ok(customer)
    }
}
