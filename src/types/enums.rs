//! Closed value sets accepted by the API, with exhaustive parsing.

// self
use crate::{_prelude::*, error::ValidationError};

macro_rules! def_enum {
	($name:ident, $kind:literal, $doc:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				#[doc = concat!("`", $value, "`.")]
				#[serde(rename = $value)]
				$variant,
			)+
		}
		impl $name {
			/// Every value, in declaration order.
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			/// Wire value.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $value,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = ValidationError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::ALL
					.iter()
					.copied()
					.find(|v| v.as_str() == s)
					.ok_or_else(|| ValidationError::InvalidEnum {
						kind: $kind,
						value: s.to_owned(),
					})
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.as_str()
			}
		}
	};
}

def_enum!(Weekday, "weekday", "Day codes used by schedules and recurrence rules." {
	Sunday => "SU",
	Monday => "MO",
	Tuesday => "TU",
	Wednesday => "WE",
	Thursday => "TH",
	Friday => "FR",
	Saturday => "SA",
});

def_enum!(Frequency, "frequency", "Recurrence frequency." {
	Daily => "DAILY",
	Weekly => "WEEKLY",
	Monthly => "MONTHLY",
	Yearly => "YEARLY",
});

def_enum!(DoorStatus, "door status", "Door state applied by a door exception." {
	Locked => "locked",
	CardAndCode => "card_and_code",
	AccessControlled => "access_controlled",
	Unlocked => "unlocked",
});

def_enum!(AccessEventType, "access event type", "Access control event filter values." {
	DoorOpened => "door_opened",
	DoorRejected => "door_rejected",
	DoorGranted => "door_granted",
	DoorForcedOpen => "door_forced_open",
	DoorHeldOpen => "door_held_open",
	DoorTailgating => "door_tailgating",
	DoorCrowdDetection => "door_crowd_detection",
	DoorTamper => "door_tamper",
	DoorPoiDetection => "door_poi_detection",
	DoorInitialized => "door_initialized",
	DoorArmed => "door_armed",
	DoorArmedButtonPressed => "door_armed_button_pressed",
	DoorAuxUnlock => "door_aux_unlock",
	DoorLocked => "door_locked",
	DoorUnlocked => "door_unlocked",
	DoorUnarmedEvent => "door_unarmed_event",
	DoorCodeEnteredEvent => "door_code_entered_event",
	DoorButtonPressEnteredEvent => "door_button_press_entered_event",
	DoorAcuStartup => "door_acu_startup",
	DoorLockStateChanged => "door_lock_state_changed",
	DoorLockdown => "door_lockdown",
	DoorAuxinputChangeState => "door_auxinput_change_state",
	DoorAuxinputHeld => "door_auxinput_held",
	DoorLowBattery => "door_low_battery",
	DoorCriticalBattery => "door_critical_battery",
	DoorMobileNfcScanAccepted => "door_mobile_nfc_scan_accepted",
	DoorMobileNfcScanRejected => "door_mobile_nfc_scan_rejected",
	DoorUserDatabaseCorrupt => "door_user_database_corrupt",
	DoorKeycardEnteredAccepted => "door_keycard_entered_accepted",
	DoorKeycardEnteredRejected => "door_keycard_entered_rejected",
	DoorCodeEnteredAccepted => "door_code_entered_accepted",
	DoorCodeEnteredRejected => "door_code_entered_rejected",
	DoorRemoteUnlockAccepted => "door_remote_unlock_accepted",
	DoorRemoteUnlockRejected => "door_remote_unlock_rejected",
	DoorPressToExitAccepted => "door_press_to_exit_accepted",
	DoorBleUnlockAttemptAccepted => "door_ble_unlock_attempt_accepted",
	DoorBleUnlockAttemptRejected => "door_ble_unlock_attempt_rejected",
	DoorAcuOffline => "door_acu_offline",
	DoorFireAlarmTriggered => "door_fire_alarm_triggered",
	DoorFireAlarmReleased => "door_fire_alarm_released",
	DoorAcuFireAlarmTriggered => "door_acu_fire_alarm_triggered",
	DoorAcuFireAlarmReleased => "door_acu_fire_alarm_released",
	DoorScheduleToggle => "door_schedule_toggle",
	DoorAcuDpiCut => "door_acu_dpi_cut",
	DoorAcuDpiShort => "door_acu_dpi_short",
	DoorAcuRexCut => "door_acu_rex_cut",
	DoorAcuRexShort => "door_acu_rex_short",
	DoorAcuRex2Cut => "door_acu_rex2_cut",
	DoorAcuRex2Short => "door_acu_rex2_short",
	DoorAcuAuxinputCut => "door_acu_auxinput_cut",
	DoorAcuAuxinputShort => "door_acu_auxinput_short",
	DoorLockdownDebounced => "door_lockdown_debounced",
	DoorLpPresentedAccepted => "door_lp_presented_accepted",
	DoorLpPresentedRejected => "door_lp_presented_rejected",
	DoorApbDoubleEntry => "door_apb_double_entry",
	DoorApbDoubleExit => "door_apb_double_exit",
	AllAccessGranted => "all_access_granted",
	AllAccessRejected => "all_access_rejected",
	DoorAuxoutputActivated => "door_auxoutput_activated",
	DoorAuxoutputDeactivated => "door_auxoutput_deactivated",
});

def_enum!(CardType, "card type", "Card formats accepted when adding an access card." {
	Standard26BitWiegand => "Standard 26-bit Wiegand",
	Hid37Bit => "HID 37-bit",
	Hid37BitNoFacilityCode => "HID 37-bit No Facility Code",
	Hid34Bit => "HID 34-bit",
	CasiRusco40Bit => "Casi Rusco 40-Bit",
	HidCorporate1000_35 => "HID Corporate 1000-35",
	HidCorporate1000_48 => "HID Corporate 1000-48",
	HidIclass => "HID iClass",
	DesfireCsn => "DESFire CSN",
	VerkadaDesfire => "Verkada DESFire",
	Desfire40x => "DESFire 40X",
	AppleWalletPass => "Apple Wallet Pass",
	Mifare4ByteCsn => "MiFare 4-Byte (32 bit) CSN",
	MdcCustom64Bit => "MDC Custom 64-bit",
	Hid36BitKeyscan => "HID 36-bit Keyscan",
	Hid33BitDsx => "HID 33-bit DSX",
	Hid33BitRs2 => "HID 33-bit RS2",
	Hid36BitSimplex => "HID 36-bit Simplex",
	Cansec37Bit => "Cansec 37-bit",
	CreditCardBinNumber => "Credit Card BIN Number",
	KantechXsf => "Kantech XSF",
	Schlage34Bit => "Schlage 34-bit",
	Schlage37Bit => "Schlage 37-bit",
	Rbh50Bit => "RBH 50-bit",
	GuardallGProxII36Bit => "Guardall G-Prox II 36-bit",
	Amag32Bit => "AMAG 32-bit",
	Securitas37Bit => "Securitas 37-bit",
	Kastle32Bit => "Kastle 32-bit",
	PointguardMdi37Bit => "PointGuard MDI 37-bit",
	Blackboard64Bit => "Blackboard 64-bit",
	Idm64Bit => "IDm 64-bit",
	Continental36Bit => "Continental 36-bit",
	Awid34Bit => "AWID 34-bit",
	LicensePlate => "License Plate",
	HidInfinity37Bit => "HID Infinity 37-bit",
	HidCeridian26Bit => "HID Ceridian 26-bit",
	Iclass35Bit => "iClass 35-bit",
	AndoverControls37Bit => "Andover Controls 37-bit",
});

def_enum!(SensorField, "sensor field", "Environmental sensor readings and alert fields." {
	Humidity => "humidity",
	Motion => "motion",
	NoiseLevel => "noise_level",
	Pm2_5 => "pm_2_5",
	Pm4_0 => "pm_4_0",
	Pm1_0_0 => "pm_1_0_0",
	Tamper => "tamper",
	Temperature => "temperature",
	TvocSv11 => "tvoc(SV11)",
	UsaAirQualityIndex => "usa_air_quality_index",
	VapeIndex => "vape_index",
	CarbonDioxide => "carbon_dioxide",
	CarbonMonoxide => "carbon_monoxide",
	BarometricPressure => "barometric_pressure",
	Formaldehyde => "formaldehyde",
	AmbientLight => "ambient_light",
	TvocIndex => "tvoc_index(SV23/SV25)",
	HeatIndex => "heat_index",
});

def_enum!(OccupancyInterval, "occupancy interval", "Bucket width for occupancy trends." {
	FifteenMinutes => "15_minutes",
	OneHour => "1_hour",
	SixHours => "6_hours",
	TwelveHours => "12_hours",
	OneDay => "1_day",
	ThirtyDays => "30_days",
});

def_enum!(OccupancyType, "occupancy type", "Object class counted by occupancy trends." {
	Person => "person",
	Vehicle => "vehicle",
});

def_enum!(BackupVideoQuality, "cloud backup video quality", "Cloud backup video quality." {
	StandardQuality => "STANDARD_QUALITY",
	HighQuality => "HIGH_QUALITY",
});

def_enum!(BackupVideoToUpload, "cloud backup video to upload", "Footage selected for cloud backup." {
	All => "ALL",
	Motion => "MOTION",
});

def_enum!(ThumbnailResolution, "thumbnail resolution", "Resolution of camera thumbnails." {
	LowRes => "low-res",
	HiRes => "hi-res",
});

def_enum!(StreamResolution, "stream resolution", "Resolution of an HLS camera stream." {
	LowRes => "low_res",
	HighRes => "high_res",
});

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn round_trips<T>(all: &[T])
	where
		T: Copy + PartialEq + Debug + FromStr<Err = ValidationError> + AsRef<str>,
	{
		for value in all {
			assert_eq!(value.as_ref().parse::<T>().expect("Wire value should parse."), *value);
		}
	}

	#[test]
	fn every_value_is_accepted() {
		round_trips(Weekday::ALL);
		round_trips(Frequency::ALL);
		round_trips(DoorStatus::ALL);
		round_trips(AccessEventType::ALL);
		round_trips(CardType::ALL);
		round_trips(SensorField::ALL);
		round_trips(OccupancyInterval::ALL);
		round_trips(OccupancyType::ALL);
		round_trips(BackupVideoQuality::ALL);
		round_trips(BackupVideoToUpload::ALL);
		round_trips(ThumbnailResolution::ALL);
		round_trips(StreamResolution::ALL);
	}

	#[test]
	fn values_outside_the_set_are_rejected() {
		assert_eq!(
			"MONDAY".parse::<Weekday>(),
			Err(ValidationError::InvalidEnum { kind: "weekday", value: "MONDAY".into() })
		);
		assert!("hourly".parse::<Frequency>().is_err());
		assert!("open".parse::<DoorStatus>().is_err());
		assert!("door_exploded".parse::<AccessEventType>().is_err());
		assert!("".parse::<SensorField>().is_err());
	}

	#[test]
	fn serde_uses_wire_values() {
		assert_eq!(
			serde_json::to_value(CardType::Standard26BitWiegand).expect("Enum should serialize."),
			json!("Standard 26-bit Wiegand")
		);
		assert_eq!(
			serde_json::from_value::<SensorField>(json!("tvoc(SV11)"))
				.expect("Enum should deserialize."),
			SensorField::TvocSv11
		);
		assert_eq!(Weekday::ALL.len(), 7);
	}
}
