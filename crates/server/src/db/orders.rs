//! Order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;

use namo_core::{Order, OrderId, OrderStatus, PaymentMethod, Price, ProductId};

use super::RepositoryError;

/// Fields needed to insert an order.
#[derive(Debug)]
pub struct NewOrder<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub total_price: Price,
    pub payment_method: PaymentMethod,
}

/// One cart line submitted with an order, used only under the automatic
/// stock policy.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    name: String,
    email: String,
    address: String,
    total_price: String,
    payment_method: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&row.total_price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid total in database: {e}"))
        })?;
        let total_price = Price::new(amount).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid total in database: {e}"))
        })?;
        let payment_method = PaymentMethod::from_str(&row.payment_method).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;
        let status = OrderStatus::from_str(&row.status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            total_price,
            payment_method,
            status,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, name, email, address, total_price, payment_method, status, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Insert a Pending order, optionally decrementing stock for the given
    /// lines in the same transaction.
    ///
    /// Every decrement is guarded by `stock >= quantity`; if any line cannot
    /// be satisfied the whole transaction rolls back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if a line references a missing
    /// product, `RepositoryError::Conflict` if a line exceeds available
    /// stock, `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new: NewOrder<'_>,
        lines: &[OrderLine],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for line in lines {
            let result = sqlx::query(
                "UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1",
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE id = ?")
                        .bind(line.product_id)
                        .fetch_one(&mut *tx)
                        .await?;

                // Dropping the transaction rolls back earlier decrements.
                return Err(if exists == 0 {
                    RepositoryError::NotFound
                } else {
                    RepositoryError::Conflict(format!(
                        "insufficient stock for product {}",
                        line.product_id
                    ))
                });
            }
        }

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO orders (name, email, address, total_price, payment_method, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.address)
        .bind(new.total_price.to_string())
        .bind(new.payment_method.to_string())
        .bind(OrderStatus::Pending.to_string())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OrderId::new(id))
    }

    /// Overwrite an order's status.
    ///
    /// No transition check is performed here: any Dispatched/Delivered
    /// write is applied regardless of the current status. The forward-only
    /// sequencing lives in the dashboard's action availability
    /// (`OrderStatus::next`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist,
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
