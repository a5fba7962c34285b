//! PostgreSQL store adapter via SQLx, behind the `sqlx-postgres` feature.
//!
//! Schema lives in `migrations/0001_user_records.sql`. The uniqueness
//! constraints on `user_profiles.auth_user_id`,
//! `user_settings.user_profile_id`, and `user_statuses.user_profile_id` are
//! what make create/restore race-safe: a lost check-then-insert race comes
//! back as a unique violation, mapped to [`StoreError::Constraint`].

#[cfg(feature = "sqlx-postgres")]
pub mod pg {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;

    use crate::adapters::{EntityStore, NaturalKeyStore, StoreAdapter, WriteOutcome};
    use crate::error::StoreError;
    use crate::types::{
        AccountStatus, Subscription, UserProfile, UserSettings, UserStatus,
    };

    /// Connection pool tuning for [`PgStoreAdapter`].
    #[derive(Debug, Clone)]
    pub struct PoolConfig {
        pub max_connections: u32,
        pub min_connections: u32,
        pub acquire_timeout: std::time::Duration,
        pub idle_timeout: Option<std::time::Duration>,
        pub max_lifetime: Option<std::time::Duration>,
    }

    impl Default for PoolConfig {
        fn default() -> Self {
            Self {
                max_connections: 10,
                min_connections: 0,
                acquire_timeout: std::time::Duration::from_secs(30),
                idle_timeout: Some(std::time::Duration::from_secs(600)),
                max_lifetime: Some(std::time::Duration::from_secs(1800)),
            }
        }
    }

    /// PostgreSQL store adapter.
    pub struct PgStoreAdapter {
        pool: PgPool,
    }

    impl PgStoreAdapter {
        pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
            let pool = PgPool::connect(database_url).await?;
            Ok(Self { pool })
        }

        pub async fn with_config(
            database_url: &str,
            config: PoolConfig,
        ) -> Result<Self, sqlx::Error> {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(config.acquire_timeout)
                .idle_timeout(config.idle_timeout)
                .max_lifetime(config.max_lifetime)
                .connect(database_url)
                .await?;
            Ok(Self { pool })
        }

        pub fn from_pool(pool: PgPool) -> Self {
            Self { pool }
        }

        pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }

        pub async fn close(&self) {
            self.pool.close().await;
        }

        /// Distinguish a failed version precondition from a vanished row.
        async fn write_miss<E>(&self, table: &str, id: &str) -> Result<WriteOutcome<E>, StoreError> {
            let exists: bool = sqlx::query_scalar(&format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
                table
            ))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            if exists {
                Ok(WriteOutcome::Conflict)
            } else {
                Ok(WriteOutcome::Missing)
            }
        }
    }

    // ── Profiles ──

    #[async_trait]
    impl EntityStore<UserProfile> for PgStoreAdapter {
        async fn insert(&self, record: UserProfile) -> Result<UserProfile, StoreError> {
            let profile = sqlx::query_as::<_, UserProfile>(
                r#"
                INSERT INTO user_profiles
                    (id, auth_user_id, display_name, first_name, last_name, avatar, bio,
                     country, date_of_birth, phone, created_at, updated_at, deleted_at,
                     is_deleted, version)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(&record.auth_user_id)
            .bind(&record.display_name)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(&record.avatar)
            .bind(&record.bio)
            .bind(&record.country)
            .bind(record.date_of_birth)
            .bind(&record.phone)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_one(&self.pool)
            .await?;

            Ok(profile)
        }

        async fn fetch(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
            let profile =
                sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(profile)
        }

        async fn save(
            &self,
            expected_version: Option<i32>,
            record: UserProfile,
        ) -> Result<WriteOutcome<UserProfile>, StoreError> {
            let updated = sqlx::query_as::<_, UserProfile>(
                r#"
                UPDATE user_profiles SET
                    display_name = $3, first_name = $4, last_name = $5, avatar = $6,
                    bio = $7, country = $8, date_of_birth = $9, phone = $10,
                    updated_at = $11, deleted_at = $12, is_deleted = $13, version = $14
                WHERE id = $1 AND ($2::int4 IS NULL OR version = $2)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(expected_version)
            .bind(&record.display_name)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(&record.avatar)
            .bind(&record.bio)
            .bind(&record.country)
            .bind(record.date_of_birth)
            .bind(&record.phone)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_optional(&self.pool)
            .await?;

            match updated {
                Some(profile) => Ok(WriteOutcome::Written(profile)),
                None => self.write_miss("user_profiles", &record.id).await,
            }
        }
    }

    #[async_trait]
    impl NaturalKeyStore<UserProfile> for PgStoreAdapter {
        async fn fetch_by_key(&self, key: &str) -> Result<Option<UserProfile>, StoreError> {
            let profile = sqlx::query_as::<_, UserProfile>(
                "SELECT * FROM user_profiles WHERE auth_user_id = $1",
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
            Ok(profile)
        }
    }

    // ── Settings ──

    #[async_trait]
    impl EntityStore<UserSettings> for PgStoreAdapter {
        async fn insert(&self, record: UserSettings) -> Result<UserSettings, StoreError> {
            let settings = sqlx::query_as::<_, UserSettings>(
                r#"
                INSERT INTO user_settings
                    (id, user_profile_id, language, theme, timezone, email_notifications,
                     push_notifications, sms_notifications, marketing_emails, autoplay,
                     video_quality, subtitles_enabled, subtitles_language, maturity_rating,
                     data_saver_mode, two_factor_enabled, session_timeout,
                     privacy_show_profile, privacy_show_activity, privacy_allow_messages,
                     created_at, updated_at, deleted_at, is_deleted, version)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                        $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(&record.user_profile_id)
            .bind(&record.language)
            .bind(&record.theme)
            .bind(&record.timezone)
            .bind(record.email_notifications)
            .bind(record.push_notifications)
            .bind(record.sms_notifications)
            .bind(record.marketing_emails)
            .bind(record.autoplay)
            .bind(&record.video_quality)
            .bind(record.subtitles_enabled)
            .bind(&record.subtitles_language)
            .bind(&record.maturity_rating)
            .bind(record.data_saver_mode)
            .bind(record.two_factor_enabled)
            .bind(record.session_timeout)
            .bind(record.privacy_show_profile)
            .bind(record.privacy_show_activity)
            .bind(record.privacy_allow_messages)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_one(&self.pool)
            .await?;

            Ok(settings)
        }

        async fn fetch(&self, id: &str) -> Result<Option<UserSettings>, StoreError> {
            let settings =
                sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(settings)
        }

        async fn save(
            &self,
            expected_version: Option<i32>,
            record: UserSettings,
        ) -> Result<WriteOutcome<UserSettings>, StoreError> {
            let updated = sqlx::query_as::<_, UserSettings>(
                r#"
                UPDATE user_settings SET
                    language = $3, theme = $4, timezone = $5, email_notifications = $6,
                    push_notifications = $7, sms_notifications = $8, marketing_emails = $9,
                    autoplay = $10, video_quality = $11, subtitles_enabled = $12,
                    subtitles_language = $13, maturity_rating = $14, data_saver_mode = $15,
                    two_factor_enabled = $16, session_timeout = $17,
                    privacy_show_profile = $18, privacy_show_activity = $19,
                    privacy_allow_messages = $20, updated_at = $21, deleted_at = $22,
                    is_deleted = $23, version = $24
                WHERE id = $1 AND ($2::int4 IS NULL OR version = $2)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(expected_version)
            .bind(&record.language)
            .bind(&record.theme)
            .bind(&record.timezone)
            .bind(record.email_notifications)
            .bind(record.push_notifications)
            .bind(record.sms_notifications)
            .bind(record.marketing_emails)
            .bind(record.autoplay)
            .bind(&record.video_quality)
            .bind(record.subtitles_enabled)
            .bind(&record.subtitles_language)
            .bind(&record.maturity_rating)
            .bind(record.data_saver_mode)
            .bind(record.two_factor_enabled)
            .bind(record.session_timeout)
            .bind(record.privacy_show_profile)
            .bind(record.privacy_show_activity)
            .bind(record.privacy_allow_messages)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_optional(&self.pool)
            .await?;

            match updated {
                Some(settings) => Ok(WriteOutcome::Written(settings)),
                None => self.write_miss("user_settings", &record.id).await,
            }
        }
    }

    #[async_trait]
    impl NaturalKeyStore<UserSettings> for PgStoreAdapter {
        async fn fetch_by_key(&self, key: &str) -> Result<Option<UserSettings>, StoreError> {
            let settings = sqlx::query_as::<_, UserSettings>(
                "SELECT * FROM user_settings WHERE user_profile_id = $1",
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
            Ok(settings)
        }
    }

    // ── Subscriptions ──

    #[async_trait]
    impl EntityStore<Subscription> for PgStoreAdapter {
        async fn insert(&self, record: Subscription) -> Result<Subscription, StoreError> {
            let subscription = sqlx::query_as::<_, Subscription>(
                r#"
                INSERT INTO subscriptions
                    (id, user_profile_id, plan_type, status, billing_cycle, start_date,
                     end_date, renewal_date, canceled_at, suspended_at, trial_ends_at,
                     is_auto_renew, is_trial, max_devices, max_profiles, can_download,
                     video_quality, ads_enabled, external_subscription_id, payment_method,
                     metadata, created_at, updated_at, deleted_at, is_deleted, version)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                        $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(&record.user_profile_id)
            .bind(&record.plan_type)
            .bind(record.status)
            .bind(&record.billing_cycle)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(record.renewal_date)
            .bind(record.canceled_at)
            .bind(record.suspended_at)
            .bind(record.trial_ends_at)
            .bind(record.is_auto_renew)
            .bind(record.is_trial)
            .bind(record.max_devices)
            .bind(record.max_profiles)
            .bind(record.can_download)
            .bind(&record.video_quality)
            .bind(record.ads_enabled)
            .bind(&record.external_subscription_id)
            .bind(&record.payment_method)
            .bind(&record.metadata)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_one(&self.pool)
            .await?;

            Ok(subscription)
        }

        async fn fetch(&self, id: &str) -> Result<Option<Subscription>, StoreError> {
            let subscription =
                sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(subscription)
        }

        async fn save(
            &self,
            expected_version: Option<i32>,
            record: Subscription,
        ) -> Result<WriteOutcome<Subscription>, StoreError> {
            let updated = sqlx::query_as::<_, Subscription>(
                r#"
                UPDATE subscriptions SET
                    plan_type = $3, status = $4, billing_cycle = $5, start_date = $6,
                    end_date = $7, renewal_date = $8, canceled_at = $9, suspended_at = $10,
                    trial_ends_at = $11, is_auto_renew = $12, is_trial = $13,
                    max_devices = $14, max_profiles = $15, can_download = $16,
                    video_quality = $17, ads_enabled = $18, external_subscription_id = $19,
                    payment_method = $20, metadata = $21, updated_at = $22,
                    deleted_at = $23, is_deleted = $24, version = $25
                WHERE id = $1 AND ($2::int4 IS NULL OR version = $2)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(expected_version)
            .bind(&record.plan_type)
            .bind(record.status)
            .bind(&record.billing_cycle)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(record.renewal_date)
            .bind(record.canceled_at)
            .bind(record.suspended_at)
            .bind(record.trial_ends_at)
            .bind(record.is_auto_renew)
            .bind(record.is_trial)
            .bind(record.max_devices)
            .bind(record.max_profiles)
            .bind(record.can_download)
            .bind(&record.video_quality)
            .bind(record.ads_enabled)
            .bind(&record.external_subscription_id)
            .bind(&record.payment_method)
            .bind(&record.metadata)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_optional(&self.pool)
            .await?;

            match updated {
                Some(subscription) => Ok(WriteOutcome::Written(subscription)),
                None => self.write_miss("subscriptions", &record.id).await,
            }
        }
    }

    // ── Statuses ──

    #[async_trait]
    impl EntityStore<UserStatus> for PgStoreAdapter {
        async fn insert(&self, record: UserStatus) -> Result<UserStatus, StoreError> {
            let status = sqlx::query_as::<_, UserStatus>(
                r#"
                INSERT INTO user_statuses
                    (id, user_profile_id, status, reason, reason_detail, actioned_by,
                     actioned_at, expires_at, notes, can_login, can_stream, can_comment,
                     can_upload, can_message, can_purchase, requires_kyc, is_verified,
                     is_moderator, is_content_creator, is_premium_supporter, created_at,
                     updated_at, deleted_at, is_deleted, version)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                        $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(&record.user_profile_id)
            .bind(record.status)
            .bind(&record.reason)
            .bind(&record.reason_detail)
            .bind(&record.actioned_by)
            .bind(record.actioned_at)
            .bind(record.expires_at)
            .bind(&record.notes)
            .bind(record.can_login)
            .bind(record.can_stream)
            .bind(record.can_comment)
            .bind(record.can_upload)
            .bind(record.can_message)
            .bind(record.can_purchase)
            .bind(record.requires_kyc)
            .bind(record.is_verified)
            .bind(record.is_moderator)
            .bind(record.is_content_creator)
            .bind(record.is_premium_supporter)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_one(&self.pool)
            .await?;

            Ok(status)
        }

        async fn fetch(&self, id: &str) -> Result<Option<UserStatus>, StoreError> {
            let status =
                sqlx::query_as::<_, UserStatus>("SELECT * FROM user_statuses WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(status)
        }

        async fn save(
            &self,
            expected_version: Option<i32>,
            record: UserStatus,
        ) -> Result<WriteOutcome<UserStatus>, StoreError> {
            let updated = sqlx::query_as::<_, UserStatus>(
                r#"
                UPDATE user_statuses SET
                    status = $3, reason = $4, reason_detail = $5, actioned_by = $6,
                    actioned_at = $7, expires_at = $8, notes = $9, can_login = $10,
                    can_stream = $11, can_comment = $12, can_upload = $13,
                    can_message = $14, can_purchase = $15, requires_kyc = $16,
                    is_verified = $17, is_moderator = $18, is_content_creator = $19,
                    is_premium_supporter = $20, updated_at = $21, deleted_at = $22,
                    is_deleted = $23, version = $24
                WHERE id = $1 AND ($2::int4 IS NULL OR version = $2)
                RETURNING *
                "#,
            )
            .bind(&record.id)
            .bind(expected_version)
            .bind(record.status)
            .bind(&record.reason)
            .bind(&record.reason_detail)
            .bind(&record.actioned_by)
            .bind(record.actioned_at)
            .bind(record.expires_at)
            .bind(&record.notes)
            .bind(record.can_login)
            .bind(record.can_stream)
            .bind(record.can_comment)
            .bind(record.can_upload)
            .bind(record.can_message)
            .bind(record.can_purchase)
            .bind(record.requires_kyc)
            .bind(record.is_verified)
            .bind(record.is_moderator)
            .bind(record.is_content_creator)
            .bind(record.is_premium_supporter)
            .bind(record.updated_at)
            .bind(record.deleted_at)
            .bind(record.is_deleted)
            .bind(record.version)
            .fetch_optional(&self.pool)
            .await?;

            match updated {
                Some(status) => Ok(WriteOutcome::Written(status)),
                None => self.write_miss("user_statuses", &record.id).await,
            }
        }
    }

    #[async_trait]
    impl NaturalKeyStore<UserStatus> for PgStoreAdapter {
        async fn fetch_by_key(&self, key: &str) -> Result<Option<UserStatus>, StoreError> {
            let status = sqlx::query_as::<_, UserStatus>(
                "SELECT * FROM user_statuses WHERE user_profile_id = $1",
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
            Ok(status)
        }
    }

    // ── Scans ──

    #[async_trait]
    impl StoreAdapter for PgStoreAdapter {
        async fn list_profiles(
            &self,
            offset: u64,
            limit: u64,
        ) -> Result<(Vec<UserProfile>, u64), StoreError> {
            let profiles = sqlx::query_as::<_, UserProfile>(
                r#"
                SELECT * FROM user_profiles
                WHERE is_deleted = FALSE
                ORDER BY created_at DESC
                OFFSET $1 LIMIT $2
                "#,
            )
            .bind(offset as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles WHERE is_deleted = FALSE")
                    .fetch_one(&self.pool)
                    .await?;

            Ok((profiles, total as u64))
        }

        async fn active_subscription(
            &self,
            user_profile_id: &str,
        ) -> Result<Option<Subscription>, StoreError> {
            let subscription = sqlx::query_as::<_, Subscription>(
                r#"
                SELECT * FROM subscriptions
                WHERE user_profile_id = $1 AND status = 'active' AND is_deleted = FALSE
                ORDER BY created_at DESC
                LIMIT 1
                "#,
            )
            .bind(user_profile_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(subscription)
        }

        async fn subscriptions_for_profile(
            &self,
            user_profile_id: &str,
        ) -> Result<Vec<Subscription>, StoreError> {
            let subscriptions = sqlx::query_as::<_, Subscription>(
                r#"
                SELECT * FROM subscriptions
                WHERE user_profile_id = $1 AND is_deleted = FALSE
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_profile_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(subscriptions)
        }

        async fn subscriptions_expiring_between(
            &self,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> Result<Vec<Subscription>, StoreError> {
            let subscriptions = sqlx::query_as::<_, Subscription>(
                r#"
                SELECT * FROM subscriptions
                WHERE status = 'active' AND is_deleted = FALSE
                  AND end_date >= $1 AND end_date <= $2
                ORDER BY end_date ASC
                "#,
            )
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;
            Ok(subscriptions)
        }

        async fn statuses_in(&self, status: AccountStatus) -> Result<Vec<UserStatus>, StoreError> {
            let statuses = sqlx::query_as::<_, UserStatus>(
                r#"
                SELECT * FROM user_statuses
                WHERE status = $1 AND is_deleted = FALSE
                ORDER BY actioned_at DESC NULLS LAST
                "#,
            )
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
            Ok(statuses)
        }
    }
}

#[cfg(feature = "sqlx-postgres")]
pub use pg::{PgStoreAdapter, PoolConfig};
