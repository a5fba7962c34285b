use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Billing state of a subscription.
///
/// `inactive → active → {canceled, suspended}`, `suspended → active`.
/// Canceled is terminal: no un-cancel operation is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(
    feature = "sqlx-postgres",
    derive(sqlx::Type),
    sqlx(type_name = "subscription_status", rename_all = "lowercase")
)]
pub enum SubscriptionStatus {
    Inactive,
    Active,
    Canceled,
    Suspended,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Canceled => "canceled",
            Self::Suspended => "suspended",
        }
    }
}

/// Moderation state of a user account.
///
/// `active ⇄ suspended`, `active/suspended → banned`. Banning is not
/// reversible through the transition operations, only through generic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(
    feature = "sqlx-postgres",
    derive(sqlx::Type),
    sqlx(type_name = "account_status", rename_all = "lowercase")
)]
pub enum AccountStatus {
    Active,
    Suspended,
    Banned,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Banned => "banned",
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// User profile record - the aggregate root the other entities hang off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx-postgres", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub id: String,
    /// Immutable link to the external identity. At most one active (non
    /// deleted) profile exists per auth user.
    pub auth_user_id: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub version: i32,
}

/// Profile creation data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    #[validate(length(min = 1, max = 64))]
    pub auth_user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub avatar: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub avatar: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    /// Expected record version for the optimistic-lock gate.
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Default values applied at settings creation and by the reset operation.
pub mod settings_defaults {
    pub const LANGUAGE: &str = "en";
    pub const THEME: &str = "light";
    pub const TIMEZONE: &str = "UTC";
    pub const EMAIL_NOTIFICATIONS: bool = true;
    pub const PUSH_NOTIFICATIONS: bool = true;
    pub const SMS_NOTIFICATIONS: bool = false;
    pub const MARKETING_EMAILS: bool = false;
    pub const AUTOPLAY: bool = true;
    pub const VIDEO_QUALITY: &str = "auto";
    pub const SUBTITLES_ENABLED: bool = false;
    pub const SUBTITLES_LANGUAGE: &str = "en";
    pub const MATURITY_RATING: &str = "PG-13";
    pub const DATA_SAVER_MODE: bool = false;
    pub const TWO_FACTOR_ENABLED: bool = false;
    pub const SESSION_TIMEOUT: i32 = 3600;
    pub const PRIVACY_SHOW_PROFILE: bool = true;
    pub const PRIVACY_SHOW_ACTIVITY: bool = false;
    pub const PRIVACY_ALLOW_MESSAGES: bool = true;
}

/// Per-user preference record. One-to-one child of [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx-postgres", derive(sqlx::FromRow))]
pub struct UserSettings {
    pub id: String,
    pub user_profile_id: String,
    pub language: String,
    pub theme: String,
    pub timezone: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub marketing_emails: bool,
    pub autoplay: bool,
    pub video_quality: String,
    pub subtitles_enabled: bool,
    pub subtitles_language: String,
    pub maturity_rating: String,
    pub data_saver_mode: bool,
    pub two_factor_enabled: bool,
    pub session_timeout: i32,
    pub privacy_show_profile: bool,
    pub privacy_show_activity: bool,
    pub privacy_allow_messages: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub version: i32,
}

impl UserSettings {
    /// Overwrite every preference field with the fixed default set.
    pub fn reset_to_defaults(&mut self) {
        use settings_defaults as d;
        self.language = d::LANGUAGE.to_string();
        self.theme = d::THEME.to_string();
        self.timezone = d::TIMEZONE.to_string();
        self.email_notifications = d::EMAIL_NOTIFICATIONS;
        self.push_notifications = d::PUSH_NOTIFICATIONS;
        self.sms_notifications = d::SMS_NOTIFICATIONS;
        self.marketing_emails = d::MARKETING_EMAILS;
        self.autoplay = d::AUTOPLAY;
        self.video_quality = d::VIDEO_QUALITY.to_string();
        self.subtitles_enabled = d::SUBTITLES_ENABLED;
        self.subtitles_language = d::SUBTITLES_LANGUAGE.to_string();
        self.maturity_rating = d::MATURITY_RATING.to_string();
        self.data_saver_mode = d::DATA_SAVER_MODE;
        self.two_factor_enabled = d::TWO_FACTOR_ENABLED;
        self.session_timeout = d::SESSION_TIMEOUT;
        self.privacy_show_profile = d::PRIVACY_SHOW_PROFILE;
        self.privacy_show_activity = d::PRIVACY_SHOW_ACTIVITY;
        self.privacy_allow_messages = d::PRIVACY_ALLOW_MESSAGES;
    }
}

/// Settings creation data. Unset fields take the fixed defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettings {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
    #[validate(length(max = 20))]
    pub theme: Option<String>,
    #[validate(length(max = 50))]
    pub timezone: Option<String>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub autoplay: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub subtitles_enabled: Option<bool>,
    #[validate(length(min = 2, max = 10))]
    pub subtitles_language: Option<String>,
    #[validate(length(max = 10))]
    pub maturity_rating: Option<String>,
    pub data_saver_mode: Option<bool>,
    pub two_factor_enabled: Option<bool>,
    #[validate(range(min = 60, max = 86400))]
    pub session_timeout: Option<i32>,
    pub privacy_show_profile: Option<bool>,
    pub privacy_show_activity: Option<bool>,
    pub privacy_allow_messages: Option<bool>,
}

/// Partial settings update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
    #[validate(length(max = 20))]
    pub theme: Option<String>,
    #[validate(length(max = 50))]
    pub timezone: Option<String>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub autoplay: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub subtitles_enabled: Option<bool>,
    #[validate(length(min = 2, max = 10))]
    pub subtitles_language: Option<String>,
    #[validate(length(max = 10))]
    pub maturity_rating: Option<String>,
    pub data_saver_mode: Option<bool>,
    pub two_factor_enabled: Option<bool>,
    #[validate(range(min = 60, max = 86400))]
    pub session_timeout: Option<i32>,
    pub privacy_show_profile: Option<bool>,
    pub privacy_show_activity: Option<bool>,
    pub privacy_allow_messages: Option<bool>,
    /// Expected record version for the optimistic-lock gate.
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Subscription record. One-to-many child of [`UserProfile`]; only one is
/// considered "active" per profile at query time, by status filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx-postgres", derive(sqlx::FromRow))]
pub struct Subscription {
    pub id: String,
    pub user_profile_id: String,
    pub plan_type: String,
    pub status: SubscriptionStatus,
    pub billing_cycle: Option<String>,
    pub start_date: DateTime<Utc>,
    /// Governs expiration: a subscription without an end date never expires.
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_auto_renew: bool,
    pub is_trial: bool,
    pub max_devices: i32,
    pub max_profiles: i32,
    pub can_download: bool,
    pub video_quality: String,
    pub ads_enabled: bool,
    pub external_subscription_id: Option<String>,
    pub payment_method: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub version: i32,
}

impl Subscription {
    /// A subscription with no end date never expires; otherwise it is expired
    /// once `now` passes the end date.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            Some(end_date) => now > end_date,
            None => false,
        }
    }
}

/// Subscription creation data. `metadata` arrives already parsed; the message
/// layer is responsible for decoding the wire-level JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscription {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
    #[validate(length(min = 1, max = 50))]
    pub plan_type: String,
    pub status: Option<SubscriptionStatus>,
    #[validate(length(max = 50))]
    pub billing_cycle: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_auto_renew: Option<bool>,
    pub is_trial: Option<bool>,
    #[validate(range(min = 1))]
    pub max_devices: Option<i32>,
    #[validate(range(min = 1))]
    pub max_profiles: Option<i32>,
    pub can_download: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub ads_enabled: Option<bool>,
    #[validate(length(max = 255))]
    pub external_subscription_id: Option<String>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub metadata: Option<Value>,
}

/// Partial subscription update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPatch {
    #[validate(length(min = 1, max = 50))]
    pub plan_type: Option<String>,
    pub status: Option<SubscriptionStatus>,
    #[validate(length(max = 50))]
    pub billing_cycle: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_auto_renew: Option<bool>,
    pub is_trial: Option<bool>,
    #[validate(range(min = 1))]
    pub max_devices: Option<i32>,
    #[validate(range(min = 1))]
    pub max_profiles: Option<i32>,
    pub can_download: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub ads_enabled: Option<bool>,
    #[validate(length(max = 255))]
    pub external_subscription_id: Option<String>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub metadata: Option<Value>,
    /// Expected record version for the optimistic-lock gate.
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Moderation record. One-to-one child of [`UserProfile`].
///
/// The capability flags are kept consistent with `status` by the suspend /
/// ban / activate transitions, not by a general constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx-postgres", derive(sqlx::FromRow))]
pub struct UserStatus {
    pub id: String,
    pub user_profile_id: String,
    pub status: AccountStatus,
    pub reason: Option<String>,
    pub reason_detail: Option<String>,
    pub actioned_by: Option<String>,
    pub actioned_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub can_login: bool,
    pub can_stream: bool,
    pub can_comment: bool,
    pub can_upload: bool,
    pub can_message: bool,
    pub can_purchase: bool,
    pub requires_kyc: bool,
    pub is_verified: bool,
    pub is_moderator: bool,
    pub is_content_creator: bool,
    pub is_premium_supporter: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub version: i32,
}

/// Status creation data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatus {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
    pub status: Option<AccountStatus>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
    #[validate(length(max = 1000))]
    pub reason_detail: Option<String>,
    #[validate(length(max = 64))]
    pub actioned_by: Option<String>,
    pub actioned_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub can_login: Option<bool>,
    pub can_stream: Option<bool>,
    pub can_comment: Option<bool>,
    pub can_upload: Option<bool>,
    pub can_message: Option<bool>,
    pub can_purchase: Option<bool>,
    pub requires_kyc: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_moderator: Option<bool>,
    pub is_content_creator: Option<bool>,
    pub is_premium_supporter: Option<bool>,
}

/// Partial status update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub status: Option<AccountStatus>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
    #[validate(length(max = 1000))]
    pub reason_detail: Option<String>,
    #[validate(length(max = 64))]
    pub actioned_by: Option<String>,
    pub actioned_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub can_login: Option<bool>,
    pub can_stream: Option<bool>,
    pub can_comment: Option<bool>,
    pub can_upload: Option<bool>,
    pub can_message: Option<bool>,
    pub can_purchase: Option<bool>,
    pub requires_kyc: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_moderator: Option<bool>,
    pub is_content_creator: Option<bool>,
    pub is_premium_supporter: Option<bool>,
    /// Expected record version for the optimistic-lock gate.
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
