//! Control Change controller numbers

pub const BANK_MSB: u8 = 0x00;
pub const MOD_WHEEL_MSB: u8 = 0x01;
pub const BREATH_MSB: u8 = 0x02;
pub const FOOT_MSB: u8 = 0x04;
pub const PORTAMENTO_TIME_MSB: u8 = 0x05;
pub const DATA_ENTRY_MSB: u8 = 0x06;
pub const MAIN_VOLUME_MSB: u8 = 0x07;
pub const BALANCE_MSB: u8 = 0x08;
pub const PAN_MSB: u8 = 0x0A;
pub const EXPRESSION_MSB: u8 = 0x0B;
pub const EFFECT1_MSB: u8 = 0x0C;
pub const EFFECT2_MSB: u8 = 0x0D;
pub const GENERAL_PURPOSE1_MSB: u8 = 0x10;
pub const GENERAL_PURPOSE2_MSB: u8 = 0x11;
pub const GENERAL_PURPOSE3_MSB: u8 = 0x12;
pub const GENERAL_PURPOSE4_MSB: u8 = 0x13;

pub const BANK_LSB: u8 = 0x20;
pub const MOD_WHEEL_LSB: u8 = 0x21;
pub const BREATH_LSB: u8 = 0x22;
pub const FOOT_LSB: u8 = 0x24;
pub const PORTAMENTO_TIME_LSB: u8 = 0x25;
pub const DATA_ENTRY_LSB: u8 = 0x26;
pub const MAIN_VOLUME_LSB: u8 = 0x27;
pub const BALANCE_LSB: u8 = 0x28;
pub const PAN_LSB: u8 = 0x2A;
pub const EXPRESSION_LSB: u8 = 0x2B;
pub const EFFECT1_LSB: u8 = 0x2C;
pub const EFFECT2_LSB: u8 = 0x2D;
pub const GENERAL_PURPOSE1_LSB: u8 = 0x30;
pub const GENERAL_PURPOSE2_LSB: u8 = 0x31;
pub const GENERAL_PURPOSE3_LSB: u8 = 0x32;
pub const GENERAL_PURPOSE4_LSB: u8 = 0x33;

// Switches (0-63 off, 64-127 on)
pub const SUSTAIN: u8 = 0x40;
pub const PORTAMENTO: u8 = 0x41;
pub const SOSTENUTO: u8 = 0x42;
pub const SOFT_PEDAL: u8 = 0x43;
pub const LEGATO_FOOTSWITCH: u8 = 0x44;
pub const HOLD2: u8 = 0x45;

// Sound controllers
pub const SOUND_VARIATION: u8 = 0x46;
pub const TIMBRE: u8 = 0x47;
pub const RELEASE_TIME: u8 = 0x48;
pub const ATTACK_TIME: u8 = 0x49;
pub const BRIGHTNESS: u8 = 0x4A;
pub const SOUND_CONTROLLER6: u8 = 0x4B;
pub const SOUND_CONTROLLER7: u8 = 0x4C;
pub const SOUND_CONTROLLER8: u8 = 0x4D;
pub const SOUND_CONTROLLER9: u8 = 0x4E;
pub const SOUND_CONTROLLER10: u8 = 0x4F;

pub const GENERAL_PURPOSE5: u8 = 0x50;
pub const GENERAL_PURPOSE6: u8 = 0x51;
pub const GENERAL_PURPOSE7: u8 = 0x52;
pub const GENERAL_PURPOSE8: u8 = 0x53;
pub const PORTAMENTO_CONTROL: u8 = 0x54;

// Effect depths
pub const REVERB_DEPTH: u8 = 0x5B;
pub const TREMOLO_DEPTH: u8 = 0x5C;
pub const CHORUS_DEPTH: u8 = 0x5D;
pub const DETUNE_DEPTH: u8 = 0x5E;
pub const PHASER_DEPTH: u8 = 0x5F;

// Parameter numbers
pub const DATA_INCREMENT: u8 = 0x60;
pub const DATA_DECREMENT: u8 = 0x61;
pub const NRPN_LSB: u8 = 0x62;
pub const NRPN_MSB: u8 = 0x63;
pub const RPN_LSB: u8 = 0x64;
pub const RPN_MSB: u8 = 0x65;

// Channel mode messages
pub const ALL_SOUNDS_OFF: u8 = 0x78;
pub const RESET_CONTROLLERS: u8 = 0x79;
pub const LOCAL_CONTROL: u8 = 0x7A;
pub const ALL_NOTES_OFF: u8 = 0x7B;
pub const OMNI_OFF: u8 = 0x7C;
pub const OMNI_ON: u8 = 0x7D;
pub const MONO_ON: u8 = 0x7E;
pub const POLY_ON: u8 = 0x7F;

/// Returns true for the channel mode range (120-127)
pub const fn is_channel_mode(controller: u8) -> bool {
    controller >= ALL_SOUNDS_OFF && controller <= POLY_ON
}

/// LSB partner of a 14-bit MSB controller (0-31 → 32-63)
pub const fn lsb_for(msb_controller: u8) -> Option<u8> {
    if msb_controller < 0x20 {
        Some(msb_controller + 0x20)
    } else {
        None
    }
}
