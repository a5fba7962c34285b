//! [`Record`] and [`LifecycleRecord`] implementations for the built-in
//! entity types.
//!
//! `apply_create` and `apply_patch` follow partial semantics: a `None` in the
//! payload means "leave unchanged", matching the wire contract where absent
//! fields are not serialized.

use chrono::{DateTime, Utc};

use crate::record::{EntityKind, LifecycleRecord, Record};
use crate::types::{
    settings_defaults, AccountStatus, CreateProfile, CreateSettings, CreateStatus,
    CreateSubscription, ProfilePatch, SettingsPatch, StatusPatch, Subscription, SubscriptionPatch,
    SubscriptionStatus, UserProfile, UserSettings, UserStatus,
};

macro_rules! impl_record_envelope {
    ($ty:ty, $kind:expr) => {
        impl Record for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }
            fn version(&self) -> i32 {
                self.version
            }
            fn is_deleted(&self) -> bool {
                self.is_deleted
            }
            fn deleted_at(&self) -> Option<DateTime<Utc>> {
                self.deleted_at
            }
            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
            fn updated_at(&self) -> DateTime<Utc> {
                self.updated_at
            }
        }
    };
}

impl_record_envelope!(UserProfile, EntityKind::Profile);
impl_record_envelope!(UserSettings, EntityKind::Settings);
impl_record_envelope!(Subscription, EntityKind::Subscription);
impl_record_envelope!(UserStatus, EntityKind::Status);

// ─── Profile ────────────────────────────────────────────────────────────

impl LifecycleRecord for UserProfile {
    type Create = CreateProfile;
    type Patch = ProfilePatch;

    fn natural_key(create: &CreateProfile) -> &str {
        &create.auth_user_id
    }

    fn from_create(id: String, create: &CreateProfile, now: DateTime<Utc>) -> Self {
        UserProfile {
            id,
            auth_user_id: create.auth_user_id.clone(),
            display_name: create.display_name.clone(),
            first_name: create.first_name.clone(),
            last_name: create.last_name.clone(),
            avatar: create.avatar.clone(),
            bio: create.bio.clone(),
            country: create.country.clone(),
            date_of_birth: create.date_of_birth,
            phone: create.phone.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            version: 1,
        }
    }

    fn apply_create(&mut self, create: &CreateProfile) {
        // auth_user_id is the natural key the restore matched on; immutable.
        if let Some(display_name) = &create.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(first_name) = &create.first_name {
            self.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &create.last_name {
            self.last_name = Some(last_name.clone());
        }
        if let Some(avatar) = &create.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(bio) = &create.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(country) = &create.country {
            self.country = Some(country.clone());
        }
        if let Some(date_of_birth) = create.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(phone) = &create.phone {
            self.phone = Some(phone.clone());
        }
    }

    fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(display_name) = &patch.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = Some(last_name.clone());
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(bio) = &patch.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(country) = &patch.country {
            self.country = Some(country.clone());
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

// ─── Settings ───────────────────────────────────────────────────────────

impl LifecycleRecord for UserSettings {
    type Create = CreateSettings;
    type Patch = SettingsPatch;

    fn natural_key(create: &CreateSettings) -> &str {
        &create.user_profile_id
    }

    fn from_create(id: String, create: &CreateSettings, now: DateTime<Utc>) -> Self {
        use settings_defaults as d;
        UserSettings {
            id,
            user_profile_id: create.user_profile_id.clone(),
            language: create
                .language
                .clone()
                .unwrap_or_else(|| d::LANGUAGE.to_string()),
            theme: create.theme.clone().unwrap_or_else(|| d::THEME.to_string()),
            timezone: create
                .timezone
                .clone()
                .unwrap_or_else(|| d::TIMEZONE.to_string()),
            email_notifications: create.email_notifications.unwrap_or(d::EMAIL_NOTIFICATIONS),
            push_notifications: create.push_notifications.unwrap_or(d::PUSH_NOTIFICATIONS),
            sms_notifications: create.sms_notifications.unwrap_or(d::SMS_NOTIFICATIONS),
            marketing_emails: create.marketing_emails.unwrap_or(d::MARKETING_EMAILS),
            autoplay: create.autoplay.unwrap_or(d::AUTOPLAY),
            video_quality: create
                .video_quality
                .clone()
                .unwrap_or_else(|| d::VIDEO_QUALITY.to_string()),
            subtitles_enabled: create.subtitles_enabled.unwrap_or(d::SUBTITLES_ENABLED),
            subtitles_language: create
                .subtitles_language
                .clone()
                .unwrap_or_else(|| d::SUBTITLES_LANGUAGE.to_string()),
            maturity_rating: create
                .maturity_rating
                .clone()
                .unwrap_or_else(|| d::MATURITY_RATING.to_string()),
            data_saver_mode: create.data_saver_mode.unwrap_or(d::DATA_SAVER_MODE),
            two_factor_enabled: create.two_factor_enabled.unwrap_or(d::TWO_FACTOR_ENABLED),
            session_timeout: create.session_timeout.unwrap_or(d::SESSION_TIMEOUT),
            privacy_show_profile: create
                .privacy_show_profile
                .unwrap_or(d::PRIVACY_SHOW_PROFILE),
            privacy_show_activity: create
                .privacy_show_activity
                .unwrap_or(d::PRIVACY_SHOW_ACTIVITY),
            privacy_allow_messages: create
                .privacy_allow_messages
                .unwrap_or(d::PRIVACY_ALLOW_MESSAGES),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            version: 1,
        }
    }

    fn apply_create(&mut self, create: &CreateSettings) {
        self.apply_patch(&SettingsPatch {
            language: create.language.clone(),
            theme: create.theme.clone(),
            timezone: create.timezone.clone(),
            email_notifications: create.email_notifications,
            push_notifications: create.push_notifications,
            sms_notifications: create.sms_notifications,
            marketing_emails: create.marketing_emails,
            autoplay: create.autoplay,
            video_quality: create.video_quality.clone(),
            subtitles_enabled: create.subtitles_enabled,
            subtitles_language: create.subtitles_language.clone(),
            maturity_rating: create.maturity_rating.clone(),
            data_saver_mode: create.data_saver_mode,
            two_factor_enabled: create.two_factor_enabled,
            session_timeout: create.session_timeout,
            privacy_show_profile: create.privacy_show_profile,
            privacy_show_activity: create.privacy_show_activity,
            privacy_allow_messages: create.privacy_allow_messages,
            version: None,
        });
    }

    fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(theme) = &patch.theme {
            self.theme = theme.clone();
        }
        if let Some(timezone) = &patch.timezone {
            self.timezone = timezone.clone();
        }
        if let Some(email_notifications) = patch.email_notifications {
            self.email_notifications = email_notifications;
        }
        if let Some(push_notifications) = patch.push_notifications {
            self.push_notifications = push_notifications;
        }
        if let Some(sms_notifications) = patch.sms_notifications {
            self.sms_notifications = sms_notifications;
        }
        if let Some(marketing_emails) = patch.marketing_emails {
            self.marketing_emails = marketing_emails;
        }
        if let Some(autoplay) = patch.autoplay {
            self.autoplay = autoplay;
        }
        if let Some(video_quality) = &patch.video_quality {
            self.video_quality = video_quality.clone();
        }
        if let Some(subtitles_enabled) = patch.subtitles_enabled {
            self.subtitles_enabled = subtitles_enabled;
        }
        if let Some(subtitles_language) = &patch.subtitles_language {
            self.subtitles_language = subtitles_language.clone();
        }
        if let Some(maturity_rating) = &patch.maturity_rating {
            self.maturity_rating = maturity_rating.clone();
        }
        if let Some(data_saver_mode) = patch.data_saver_mode {
            self.data_saver_mode = data_saver_mode;
        }
        if let Some(two_factor_enabled) = patch.two_factor_enabled {
            self.two_factor_enabled = two_factor_enabled;
        }
        if let Some(session_timeout) = patch.session_timeout {
            self.session_timeout = session_timeout;
        }
        if let Some(privacy_show_profile) = patch.privacy_show_profile {
            self.privacy_show_profile = privacy_show_profile;
        }
        if let Some(privacy_show_activity) = patch.privacy_show_activity {
            self.privacy_show_activity = privacy_show_activity;
        }
        if let Some(privacy_allow_messages) = patch.privacy_allow_messages {
            self.privacy_allow_messages = privacy_allow_messages;
        }
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

// ─── Subscription ───────────────────────────────────────────────────────

impl LifecycleRecord for Subscription {
    type Create = CreateSubscription;
    type Patch = SubscriptionPatch;

    fn natural_key(create: &CreateSubscription) -> &str {
        // Not unique for subscriptions; creation never takes the restore path.
        &create.user_profile_id
    }

    fn from_create(id: String, create: &CreateSubscription, now: DateTime<Utc>) -> Self {
        Subscription {
            id,
            user_profile_id: create.user_profile_id.clone(),
            plan_type: create.plan_type.clone(),
            status: create.status.unwrap_or(SubscriptionStatus::Inactive),
            billing_cycle: create.billing_cycle.clone(),
            start_date: create.start_date.unwrap_or(now),
            end_date: create.end_date,
            renewal_date: create.renewal_date,
            canceled_at: None,
            suspended_at: None,
            trial_ends_at: create.trial_ends_at,
            is_auto_renew: create.is_auto_renew.unwrap_or(true),
            is_trial: create.is_trial.unwrap_or(false),
            max_devices: create.max_devices.unwrap_or(1),
            max_profiles: create.max_profiles.unwrap_or(1),
            can_download: create.can_download.unwrap_or(false),
            video_quality: create
                .video_quality
                .clone()
                .unwrap_or_else(|| "sd".to_string()),
            ads_enabled: create.ads_enabled.unwrap_or(true),
            external_subscription_id: create.external_subscription_id.clone(),
            payment_method: create.payment_method.clone(),
            metadata: create.metadata.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            version: 1,
        }
    }

    fn apply_create(&mut self, create: &CreateSubscription) {
        self.apply_patch(&SubscriptionPatch {
            plan_type: Some(create.plan_type.clone()),
            status: create.status,
            billing_cycle: create.billing_cycle.clone(),
            end_date: create.end_date,
            renewal_date: create.renewal_date,
            canceled_at: None,
            suspended_at: None,
            trial_ends_at: create.trial_ends_at,
            is_auto_renew: create.is_auto_renew,
            is_trial: create.is_trial,
            max_devices: create.max_devices,
            max_profiles: create.max_profiles,
            can_download: create.can_download,
            video_quality: create.video_quality.clone(),
            ads_enabled: create.ads_enabled,
            external_subscription_id: create.external_subscription_id.clone(),
            payment_method: create.payment_method.clone(),
            metadata: create.metadata.clone(),
            version: None,
        });
        if let Some(start_date) = create.start_date {
            self.start_date = start_date;
        }
    }

    fn apply_patch(&mut self, patch: &SubscriptionPatch) {
        if let Some(plan_type) = &patch.plan_type {
            self.plan_type = plan_type.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(billing_cycle) = &patch.billing_cycle {
            self.billing_cycle = Some(billing_cycle.clone());
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(renewal_date) = patch.renewal_date {
            self.renewal_date = Some(renewal_date);
        }
        if let Some(canceled_at) = patch.canceled_at {
            self.canceled_at = Some(canceled_at);
        }
        if let Some(suspended_at) = patch.suspended_at {
            self.suspended_at = Some(suspended_at);
        }
        if let Some(trial_ends_at) = patch.trial_ends_at {
            self.trial_ends_at = Some(trial_ends_at);
        }
        if let Some(is_auto_renew) = patch.is_auto_renew {
            self.is_auto_renew = is_auto_renew;
        }
        if let Some(is_trial) = patch.is_trial {
            self.is_trial = is_trial;
        }
        if let Some(max_devices) = patch.max_devices {
            self.max_devices = max_devices;
        }
        if let Some(max_profiles) = patch.max_profiles {
            self.max_profiles = max_profiles;
        }
        if let Some(can_download) = patch.can_download {
            self.can_download = can_download;
        }
        if let Some(video_quality) = &patch.video_quality {
            self.video_quality = video_quality.clone();
        }
        if let Some(ads_enabled) = patch.ads_enabled {
            self.ads_enabled = ads_enabled;
        }
        if let Some(external_subscription_id) = &patch.external_subscription_id {
            self.external_subscription_id = Some(external_subscription_id.clone());
        }
        if let Some(payment_method) = &patch.payment_method {
            self.payment_method = Some(payment_method.clone());
        }
        if let Some(metadata) = &patch.metadata {
            self.metadata = Some(metadata.clone());
        }
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

// ─── Status ─────────────────────────────────────────────────────────────

impl LifecycleRecord for UserStatus {
    type Create = CreateStatus;
    type Patch = StatusPatch;

    fn natural_key(create: &CreateStatus) -> &str {
        &create.user_profile_id
    }

    fn from_create(id: String, create: &CreateStatus, now: DateTime<Utc>) -> Self {
        UserStatus {
            id,
            user_profile_id: create.user_profile_id.clone(),
            status: create.status.unwrap_or(AccountStatus::Active),
            reason: create.reason.clone(),
            reason_detail: create.reason_detail.clone(),
            actioned_by: create.actioned_by.clone(),
            actioned_at: create.actioned_at,
            expires_at: create.expires_at,
            notes: create.notes.clone(),
            can_login: create.can_login.unwrap_or(true),
            can_stream: create.can_stream.unwrap_or(true),
            can_comment: create.can_comment.unwrap_or(true),
            can_upload: create.can_upload.unwrap_or(false),
            can_message: create.can_message.unwrap_or(true),
            can_purchase: create.can_purchase.unwrap_or(true),
            requires_kyc: create.requires_kyc.unwrap_or(false),
            is_verified: create.is_verified.unwrap_or(false),
            is_moderator: create.is_moderator.unwrap_or(false),
            is_content_creator: create.is_content_creator.unwrap_or(false),
            is_premium_supporter: create.is_premium_supporter.unwrap_or(false),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            version: 1,
        }
    }

    fn apply_create(&mut self, create: &CreateStatus) {
        self.apply_patch(&StatusPatch {
            status: create.status,
            reason: create.reason.clone(),
            reason_detail: create.reason_detail.clone(),
            actioned_by: create.actioned_by.clone(),
            actioned_at: create.actioned_at,
            expires_at: create.expires_at,
            notes: create.notes.clone(),
            can_login: create.can_login,
            can_stream: create.can_stream,
            can_comment: create.can_comment,
            can_upload: create.can_upload,
            can_message: create.can_message,
            can_purchase: create.can_purchase,
            requires_kyc: create.requires_kyc,
            is_verified: create.is_verified,
            is_moderator: create.is_moderator,
            is_content_creator: create.is_content_creator,
            is_premium_supporter: create.is_premium_supporter,
            version: None,
        });
    }

    fn apply_patch(&mut self, patch: &StatusPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(reason) = &patch.reason {
            self.reason = Some(reason.clone());
        }
        if let Some(reason_detail) = &patch.reason_detail {
            self.reason_detail = Some(reason_detail.clone());
        }
        if let Some(actioned_by) = &patch.actioned_by {
            self.actioned_by = Some(actioned_by.clone());
        }
        if let Some(actioned_at) = patch.actioned_at {
            self.actioned_at = Some(actioned_at);
        }
        if let Some(expires_at) = patch.expires_at {
            self.expires_at = Some(expires_at);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(can_login) = patch.can_login {
            self.can_login = can_login;
        }
        if let Some(can_stream) = patch.can_stream {
            self.can_stream = can_stream;
        }
        if let Some(can_comment) = patch.can_comment {
            self.can_comment = can_comment;
        }
        if let Some(can_upload) = patch.can_upload {
            self.can_upload = can_upload;
        }
        if let Some(can_message) = patch.can_message {
            self.can_message = can_message;
        }
        if let Some(can_purchase) = patch.can_purchase {
            self.can_purchase = can_purchase;
        }
        if let Some(requires_kyc) = patch.requires_kyc {
            self.requires_kyc = requires_kyc;
        }
        if let Some(is_verified) = patch.is_verified {
            self.is_verified = is_verified;
        }
        if let Some(is_moderator) = patch.is_moderator {
            self.is_moderator = is_moderator;
        }
        if let Some(is_content_creator) = patch.is_content_creator {
            self.is_content_creator = is_content_creator;
        }
        if let Some(is_premium_supporter) = patch.is_premium_supporter {
            self.is_premium_supporter = is_premium_supporter;
        }
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}
