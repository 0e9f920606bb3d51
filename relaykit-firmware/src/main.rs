//! relaykit - relay board firmware
//!
//! Main firmware binary for RP2040-based relay boards. Brings up the
//! serial debug console, decodes the board's address strings and drives
//! the mask servo back and forth.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config as SliceConfig, Pwm};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use relaykit_core::config::{MaskConfig, MAX_ENCODED_SIZE};
use relaykit_core::log::{DebugLog, Radix};
use relaykit_core::parse::{parse_bytes, parse_ipv4, parse_mac};
use relaykit_core::{debug_print, debug_printf, debug_println};
use relaykit_drivers::Mask;
use relaykit_hal::{UartConfig, UartTx};
use relaykit_hal_rp2040::{console, ServoPwm};

/// Static station address
const STATION_IP: &str = "192.168.4.1";

/// Station MAC address
const STATION_MAC: &str = "5C:CF:7F:00:12:AB";

/// Power-on relay states, one token per relay
const RELAY_DEFAULTS: &str = "1,0,0,1";

/// Relay count on the board
const RELAY_COUNT: usize = 4;

/// GPIO driving the mask servo (PWM slice 0, channel A)
const MASK_PIN: u8 = 16;

/// Dwell time at each mask position
const MASK_DWELL: Duration = Duration::from_secs(2);

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("relaykit firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut log = DebugLog::from_build(console(p.UART0, p.PIN_0, UartConfig::default()));
    debug_println!(log, "relaykit console up");

    report_addresses(&mut log);

    let mut relays = [0u8; RELAY_COUNT];
    let count = parse_bytes(RELAY_DEFAULTS, ',', &mut relays, RELAY_COUNT, 10);
    debug_print!(log, "relays: ");
    for state in &relays[..count] {
        debug_print!(log, *state, Radix::Bin);
    }
    debug_println!(log);

    let mask_config = MaskConfig::new(MASK_PIN, 180, 0);
    let mut stored = [0u8; MAX_ENCODED_SIZE];
    match mask_config.to_bytes(&mut stored) {
        Ok(bytes) => debug!("Mask config encodes to {} bytes", bytes.len()),
        Err(e) => warn!("Mask config encode failed: {}", e),
    }

    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, SliceConfig::default());
    let mut mask = Mask::new(mask_config);
    if let Err(e) = mask.setup(ServoPwm::new(pwm, MASK_PIN)) {
        error!("Mask servo setup failed: {}", e);
    }

    loop {
        match mask.toggle() {
            Ok(pulse_us) => {
                debug_printf!(log, "mask {:?} ({} us)\r\n", mask.state(), pulse_us);
            }
            Err(e) => warn!("Mask move failed: {}", e),
        }
        Timer::after(MASK_DWELL).await;
    }
}

/// Print the decoded station addresses to the console
fn report_addresses<W: UartTx>(log: &mut DebugLog<W>) {
    match parse_ipv4(STATION_IP) {
        Ok(ip) => debug_printf!(log, "ip {}.{}.{}.{}\r\n", ip[0], ip[1], ip[2], ip[3]),
        Err(e) => warn!("Bad station IP: {}", e),
    }

    match parse_mac(STATION_MAC) {
        Ok(mac) => {
            debug_print!(log, "mac ");
            for (i, octet) in mac.iter().enumerate() {
                if i > 0 {
                    debug_print!(log, ':');
                }
                if *octet < 0x10 {
                    debug_print!(log, '0');
                }
                debug_print!(log, *octet, Radix::Hex);
            }
            debug_println!(log);
        }
        Err(e) => warn!("Bad station MAC: {}", e),
    }
}
