//! Endpoint paths relative to the API root.

/// Standard API token.
pub const TOKEN: &str = "/token";
/// Streaming (HLS) token.
pub const STREAMING_TOKEN: &str = "/cameras/v1/footage/token";

/// Access control events.
pub const ACCESS_EVENTS: &str = "/events/v1/access";
/// Door listing.
pub const ACCESS_DOORS: &str = "/access/v1/doors";
/// Admin door unlock.
pub const ACCESS_DOOR_ADMIN_UNLOCK: &str = "/access/v1/door/admin_unlock";
/// User door unlock.
pub const ACCESS_DOOR_USER_UNLOCK: &str = "/access/v1/door/user_unlock";
/// Door exception calendars.
pub const ACCESS_EXCEPTION_CALENDARS: &str = "/access/v1/door/exception_calendar";
/// Access levels.
pub const ACCESS_LEVELS: &str = "/access/v1/door/access_level";
/// Access group listing.
pub const ACCESS_GROUPS: &str = "/access/v1/access_groups";
/// Single access group.
pub const ACCESS_GROUP: &str = "/access/v1/access_groups/group";
/// Access group membership.
pub const ACCESS_GROUP_USER: &str = "/access/v1/access_groups/group/user";
/// Access user listing.
pub const ACCESS_USERS: &str = "/access/v1/access_users";
/// Single access user and its sub-resources.
pub const ACCESS_USER: &str = "/access/v1/access_users/user";
/// Access cards.
pub const ACCESS_CARD: &str = "/access/v1/credentials/card";
/// License plate credentials.
pub const ACCESS_LICENSE_PLATE: &str = "/access/v1/credentials/license_plate";
/// MFA code credentials.
pub const ACCESS_MFA_CODE: &str = "/access/v1/credentials/mfa_code";

/// Camera alerts.
pub const CAMERA_ALERTS: &str = "/cameras/v1/alerts";
/// Camera devices.
pub const CAMERA_DEVICES: &str = "/cameras/v1/devices";
/// Camera audio settings.
pub const CAMERA_AUDIO: &str = "/cameras/v1/audio/status";
/// Cloud backup settings.
pub const CAMERA_CLOUD_BACKUP: &str = "/cameras/v1/cloud_backup/settings";
/// Footage deep link.
pub const CAMERA_FOOTAGE_LINK: &str = "/cameras/v1/footage/link";
/// Historical thumbnail image.
pub const CAMERA_THUMBNAIL: &str = "/cameras/v1/footage/thumbnails";
/// Latest thumbnail image.
pub const CAMERA_THUMBNAIL_LATEST: &str = "/cameras/v1/footage/thumbnails/latest";
/// Expiring thumbnail link.
pub const CAMERA_THUMBNAIL_LINK: &str = "/cameras/v1/footage/thumbnails/link";
/// Occupancy trends.
pub const CAMERA_OCCUPANCY_TRENDS: &str = "/cameras/v1/analytics/occupancy_trends";
/// Dashboard occupancy trends.
pub const CAMERA_DASHBOARD_OCCUPANCY: &str = "/cameras/v1/analytics/dashboard_occupancy_trends";
/// Cameras with occupancy trends enabled.
pub const CAMERA_OCCUPANCY_ENABLED: &str = "/cameras/v1/analytics/occupancy_trend_enabled_cameras";
/// Object counts.
pub const CAMERA_OBJECT_COUNTS: &str = "/cameras/v1/analytics/object_counts";
/// Max people/vehicle counts.
pub const CAMERA_MAX_COUNTS: &str = "/cameras/v1/analytics/max_object_counts";
/// MQTT object position config.
pub const CAMERA_OBJECT_POSITION_MQTT: &str = "/cameras/v1/analytics/object_position_mqtt";
/// Seen license plate images.
pub const CAMERA_LPR_IMAGES: &str = "/cameras/v1/analytics/lpr/images";
/// License plate timestamps.
pub const CAMERA_LPR_TIMESTAMPS: &str = "/cameras/v1/analytics/lpr/timestamps";
/// License plates of interest.
pub const CAMERA_LPOI: &str = "/cameras/v1/analytics/lpr/license_plate_of_interest";
/// Bulk license plates of interest.
pub const CAMERA_LPOI_BATCH: &str = "/cameras/v1/analytics/lpr/license_plate_of_interest/batch";
/// Persons of interest.
pub const CAMERA_POI: &str = "/cameras/v1/people/person_of_interest";
/// HLS playlist.
pub const CAMERA_STREAM: &str = "/stream/cameras/v1/footage/stream/stream.m3u8";

/// Audit logs.
pub const CORE_AUDIT_LOG: &str = "/core/v1/audit_log";
/// Organization users.
pub const CORE_USER: &str = "/core/v1/user";

/// Sensor alerts.
pub const SENSOR_ALERTS: &str = "/environment/v1/alerts";
/// Sensor readings.
pub const SENSOR_DATA: &str = "/environment/v1/data";

/// Classic alarm devices.
pub const ALARM_DEVICES: &str = "/alarms/v1/devices";
/// Classic alarm sites.
pub const ALARM_SITES: &str = "/alarms/v1/sites";

/// Guest sites.
pub const GUEST_SITES: &str = "/guest/v1/sites";
/// Guest visits.
pub const GUEST_VISITS: &str = "/guest/v1/visits";
/// Guest deny list.
pub const GUEST_DENY_LIST: &str = "/guest/v1/deny_list";

/// Helix event types.
pub const HELIX_EVENT_TYPE: &str = "/cameras/v1/video_tagging/event_type";
/// Helix events.
pub const HELIX_EVENT: &str = "/cameras/v1/video_tagging/event";
/// Helix event search.
pub const HELIX_EVENT_SEARCH: &str = "/cameras/v1/video_tagging/event/search";

/// Viewing station devices.
pub const VIEWING_STATIONS: &str = "/viewing_station/v1/devices";
