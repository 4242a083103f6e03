use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingFilter;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::ports::ListingRepository;
use crate::user::models::UserId;

const LISTING_COLUMNS: &str = "id, owner_id, title, description, service_type, category, \
                               province, city, street, street_number, price, photo_path, \
                               created_at";

pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    service_type: String,
    category: String,
    province: String,
    city: String,
    street: String,
    street_number: String,
    price: i64,
    photo_path: String,
    created_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: ListingId(row.id),
            owner_id: UserId(row.owner_id),
            title: row.title,
            description: row.description,
            service_type: row.service_type,
            category: row.category,
            province: row.province,
            city: row.city,
            street: row.street,
            street_number: row.street_number,
            price: row.price,
            photo_path: row.photo_path,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, ListingError> {
        sqlx::query(
            r#"
            INSERT INTO listings (id, owner_id, title, description, service_type, category,
                                  province, city, street, street_number, price, photo_path,
                                  created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(listing.id.0)
        .bind(listing.owner_id.0)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.service_type)
        .bind(&listing.category)
        .bind(&listing.province)
        .bind(&listing.city)
        .bind(&listing.street)
        .bind(&listing.street_number)
        .bind(listing.price)
        .bind(&listing.photo_path)
        .bind(listing.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingError> {
        let row: Option<ListingRow> = sqlx::query_as(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        Ok(row.map(Listing::from))
    }

    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingError> {
        // Conjunction of only the filters that are present
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {LISTING_COLUMNS} FROM listings WHERE 1=1"));

        if let Some(service_type) = &filter.service_type {
            builder.push(" AND service_type = ");
            builder.push_bind(service_type);
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }
        if let Some(province) = &filter.province {
            builder.push(" AND province = ");
            builder.push_bind(province);
        }
        if let Some(city) = &filter.city {
            builder.push(" AND city = ");
            builder.push_bind(city);
        }
        if let Some(min_price) = filter.min_price {
            builder.push(" AND price >= ");
            builder.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            builder.push(" AND price <= ");
            builder.push_bind(max_price);
        }

        builder.push(" ORDER BY created_at DESC");

        let rows: Vec<ListingRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Listing>, ListingError> {
        let rows: Vec<ListingRow> = sqlx::query_as(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn update(&self, listing: Listing) -> Result<Listing, ListingError> {
        let result = sqlx::query(
            r#"
            UPDATE listings
            SET title = $2, description = $3, service_type = $4, category = $5,
                province = $6, city = $7, street = $8, street_number = $9, price = $10
            WHERE id = $1
            "#,
        )
        .bind(listing.id.0)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.service_type)
        .bind(&listing.category)
        .bind(&listing.province)
        .bind(&listing.city)
        .bind(&listing.street)
        .bind(&listing.street_number)
        .bind(listing.price)
        .execute(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ListingError::NotFound(listing.id.to_string()));
        }

        Ok(listing)
    }

    async fn delete(&self, id: &ListingId) -> Result<(), ListingError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ListingError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
