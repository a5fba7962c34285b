//! Message patterns for the record-management surface.
//!
//! Centralized to keep the wire contract in one place.

// Profile patterns
pub const PROFILE_CREATE: &str = "user.profile.create";
pub const PROFILE_FIND_BY_ID: &str = "user.profile.findById";
pub const PROFILE_FIND_BY_AUTH_USER_ID: &str = "user.profile.findByAuthUserId";
pub const PROFILE_FIND_BY_ID_WITH_RELATIONS: &str = "user.profile.findByIdWithRelations";
pub const PROFILE_UPDATE: &str = "user.profile.update";
pub const PROFILE_DELETE: &str = "user.profile.delete";
pub const PROFILE_FIND_ALL: &str = "user.profile.findAll";

pub const PROFILE: &[&str] = &[
    PROFILE_CREATE,
    PROFILE_FIND_BY_ID,
    PROFILE_FIND_BY_AUTH_USER_ID,
    PROFILE_FIND_BY_ID_WITH_RELATIONS,
    PROFILE_UPDATE,
    PROFILE_DELETE,
    PROFILE_FIND_ALL,
];

// Settings patterns
pub const SETTINGS_CREATE: &str = "user.settings.create";
pub const SETTINGS_FIND_BY_ID: &str = "user.settings.findById";
pub const SETTINGS_FIND_BY_USER_PROFILE_ID: &str = "user.settings.findByUserProfileId";
pub const SETTINGS_UPDATE: &str = "user.settings.update";
pub const SETTINGS_DELETE: &str = "user.settings.delete";
pub const SETTINGS_RESET: &str = "user.settings.reset";

pub const SETTINGS: &[&str] = &[
    SETTINGS_CREATE,
    SETTINGS_FIND_BY_ID,
    SETTINGS_FIND_BY_USER_PROFILE_ID,
    SETTINGS_UPDATE,
    SETTINGS_DELETE,
    SETTINGS_RESET,
];

// Subscription patterns
pub const SUBSCRIPTION_CREATE: &str = "user.subscription.create";
pub const SUBSCRIPTION_FIND_BY_ID: &str = "user.subscription.findById";
pub const SUBSCRIPTION_FIND_ACTIVE_BY_USER_PROFILE_ID: &str =
    "user.subscription.findActiveByUserProfileId";
pub const SUBSCRIPTION_FIND_ALL_BY_USER_PROFILE_ID: &str =
    "user.subscription.findAllByUserProfileId";
pub const SUBSCRIPTION_UPDATE: &str = "user.subscription.update";
pub const SUBSCRIPTION_DELETE: &str = "user.subscription.delete";
pub const SUBSCRIPTION_CANCEL: &str = "user.subscription.cancel";
pub const SUBSCRIPTION_SUSPEND: &str = "user.subscription.suspend";
pub const SUBSCRIPTION_ACTIVATE: &str = "user.subscription.activate";
pub const SUBSCRIPTION_CHECK_EXPIRATION: &str = "user.subscription.checkExpiration";
pub const SUBSCRIPTION_FIND_EXPIRING_SOON: &str = "user.subscription.findExpiringSoon";

pub const SUBSCRIPTION: &[&str] = &[
    SUBSCRIPTION_CREATE,
    SUBSCRIPTION_FIND_BY_ID,
    SUBSCRIPTION_FIND_ACTIVE_BY_USER_PROFILE_ID,
    SUBSCRIPTION_FIND_ALL_BY_USER_PROFILE_ID,
    SUBSCRIPTION_UPDATE,
    SUBSCRIPTION_DELETE,
    SUBSCRIPTION_CANCEL,
    SUBSCRIPTION_SUSPEND,
    SUBSCRIPTION_ACTIVATE,
    SUBSCRIPTION_CHECK_EXPIRATION,
    SUBSCRIPTION_FIND_EXPIRING_SOON,
];

// Status patterns
pub const STATUS_CREATE: &str = "user.status.create";
pub const STATUS_FIND_BY_ID: &str = "user.status.findById";
pub const STATUS_FIND_BY_USER_PROFILE_ID: &str = "user.status.findByUserProfileId";
pub const STATUS_UPDATE: &str = "user.status.update";
pub const STATUS_DELETE: &str = "user.status.delete";
pub const STATUS_SUSPEND: &str = "user.status.suspend";
pub const STATUS_BAN: &str = "user.status.ban";
pub const STATUS_ACTIVATE: &str = "user.status.activate";
pub const STATUS_FIND_ALL_SUSPENDED: &str = "user.status.findAllSuspended";
pub const STATUS_FIND_ALL_BANNED: &str = "user.status.findAllBanned";

pub const STATUS: &[&str] = &[
    STATUS_CREATE,
    STATUS_FIND_BY_ID,
    STATUS_FIND_BY_USER_PROFILE_ID,
    STATUS_UPDATE,
    STATUS_DELETE,
    STATUS_SUSPEND,
    STATUS_BAN,
    STATUS_ACTIVATE,
    STATUS_FIND_ALL_SUSPENDED,
    STATUS_FIND_ALL_BANNED,
];
