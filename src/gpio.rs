// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! General-purpose I/O ports.
//!
//! Each [`Port`] instance drives one of the nine GPIO register blocks
//! (GPIOA through GPIOI). Pins are addressed by raw index within their
//! port; indices above 15 are ignored by the I/O operations.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

use crate::rcc;
use crate::static_ref::StaticRef;
use crate::ClockInterface;

/// General-purpose I/O
#[repr(C)]
pub struct GpioRegisters {
    /// mode register
    moder: ReadWrite<u32>,
    /// output type register
    otyper: ReadWrite<u32>,
    /// output speed register
    ospeedr: ReadWrite<u32>,
    /// pull-up/pull-down register
    pupdr: ReadWrite<u32>,
    /// input data register
    idr: ReadOnly<u32>,
    /// output data register
    odr: ReadWrite<u32>,
    /// bit set/reset register
    bsrr: WriteOnly<u32>,
    /// configuration lock register
    lckr: ReadWrite<u32>,
    /// alternate function low register, pins 0-7
    afrl: ReadWrite<u32>,
    /// alternate function high register, pins 8-15
    afrh: ReadWrite<u32>,
}

pub const GPIOA_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_0000 as *const GpioRegisters) };
pub const GPIOB_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_0400 as *const GpioRegisters) };
pub const GPIOC_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_0800 as *const GpioRegisters) };
pub const GPIOD_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_0C00 as *const GpioRegisters) };
pub const GPIOE_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_1000 as *const GpioRegisters) };
pub const GPIOF_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_1400 as *const GpioRegisters) };
pub const GPIOG_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_1800 as *const GpioRegisters) };
pub const GPIOH_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_1C00 as *const GpioRegisters) };
pub const GPIOI_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x4002_2000 as *const GpioRegisters) };

/// GPIO port identity. The discriminant doubles as the port selector code
/// written into the SYSCFG external interrupt configuration registers.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortId {
    A = 0b0000,
    B = 0b0001,
    C = 0b0010,
    D = 0b0011,
    E = 0b0100,
    F = 0b0101,
    G = 0b0110,
    H = 0b0111,
    I = 0b1000,
}

impl PortId {
    pub const fn exticr_code(self) -> u32 {
        self as u32
    }

    const fn clock_type(self) -> rcc::HCLK1 {
        match self {
            PortId::A => rcc::HCLK1::GPIOA,
            PortId::B => rcc::HCLK1::GPIOB,
            PortId::C => rcc::HCLK1::GPIOC,
            PortId::D => rcc::HCLK1::GPIOD,
            PortId::E => rcc::HCLK1::GPIOE,
            PortId::F => rcc::HCLK1::GPIOF,
            PortId::G => rcc::HCLK1::GPIOG,
            PortId::H => rcc::HCLK1::GPIOH,
            PortId::I => rcc::HCLK1::GPIOI,
        }
    }
}

/// Pin mode (MODER field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    AlternateFunction = 0b10,
    Analog = 0b11,
}

/// Output driver type (OTYPER field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    PushPull = 0b0,
    OpenDrain = 0b1,
}

/// Output slew rate (OSPEEDR field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    VeryHigh = 0b11,
}

/// Internal resistor selection (PUPDR field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullUpPullDown {
    NoPull = 0b00,
    PullUp = 0b01,
    PullDown = 0b10,
}

/// Configuration descriptor for a single pin.
///
/// `alternate_function` is only consulted for `Mode::AlternateFunction`;
/// values above 15 are truncated to their low nibble.
#[derive(Clone, Copy, Debug)]
pub struct PinConfig {
    pub pin_number: u8,
    pub mode: Mode,
    pub output_type: OutputType,
    pub speed: Speed,
    pub pull: PullUpPullDown,
    pub alternate_function: u8,
}

struct PortClock<'a>(rcc::PeripheralClock<'a>);

impl ClockInterface for PortClock<'_> {
    fn is_enabled(&self) -> bool {
        self.0.is_enabled()
    }

    fn enable(&self) {
        self.0.enable();
    }

    fn disable(&self) {
        self.0.disable();
    }
}

pub struct Port<'a> {
    registers: StaticRef<GpioRegisters>,
    pub id: PortId,
    clock: PortClock<'a>,
}

impl<'a> Port<'a> {
    pub const fn new(id: PortId, registers: StaticRef<GpioRegisters>, rcc: &'a rcc::Rcc) -> Self {
        Self {
            registers,
            id,
            clock: PortClock(rcc::PeripheralClock::new(
                rcc::PeripheralClockType::AHB1(id.clock_type()),
                rcc,
            )),
        }
    }

    pub fn is_enabled_clock(&self) -> bool {
        self.clock.is_enabled()
    }

    pub fn enable_clock(&self) {
        self.clock.enable();
    }

    pub fn disable_clock(&self) {
        self.clock.disable();
    }

    /// Program one pin from its configuration descriptor.
    ///
    /// The port clock is gated on before anything else, so a port can be
    /// configured without a prior explicit `enable_clock` call. Only the
    /// fields relevant to the selected mode are written: speed and output
    /// type apply to output and alternate-function pins, the pull resistor
    /// to everything but analog pins, and the alternate function nibble to
    /// alternate-function pins alone. Register fields belonging to skipped
    /// steps keep whatever value they already had.
    pub fn configure(&self, config: &PinConfig) {
        self.clock.enable();

        let pin = config.pin_number as u32;
        if pin > 15 {
            return;
        }

        let moder = self.registers.moder.get();
        self.registers
            .moder
            .set(moder & !(0b11 << (2 * pin)) | ((config.mode as u32) << (2 * pin)));

        if config.mode == Mode::Output || config.mode == Mode::AlternateFunction {
            let ospeedr = self.registers.ospeedr.get();
            self.registers
                .ospeedr
                .set(ospeedr & !(0b11 << (2 * pin)) | ((config.speed as u32) << (2 * pin)));

            let otyper = self.registers.otyper.get();
            self.registers
                .otyper
                .set(otyper & !(0b1 << pin) | ((config.output_type as u32) << pin));
        }

        if config.mode != Mode::Analog {
            let pupdr = self.registers.pupdr.get();
            self.registers
                .pupdr
                .set(pupdr & !(0b11 << (2 * pin)) | ((config.pull as u32) << (2 * pin)));
        }

        if config.mode == Mode::AlternateFunction {
            let af = (config.alternate_function as u32) & 0b1111;
            let shift = 4 * (pin % 8);
            if pin <= 7 {
                let afrl = self.registers.afrl.get();
                self.registers.afrl.set(afrl & !(0b1111 << shift) | (af << shift));
            } else {
                let afrh = self.registers.afrh.get();
                self.registers.afrh.set(afrh & !(0b1111 << shift) | (af << shift));
            }
        }
    }

    /// Return every pin of the port to its power-on state by pulsing the
    /// port's reset line.
    pub fn deinit(&self) {
        self.clock.0.reset();
    }

    /// Read one input pin. Returns 0 for pin indices above 15.
    pub fn read_pin(&self, pin: u8) -> u8 {
        if pin > 15 {
            return 0;
        }
        ((self.registers.idr.get() >> pin) & 0b1) as u8
    }

    pub fn read_port(&self) -> u16 {
        self.registers.idr.get() as u16
    }

    /// Drive one output pin through a read-modify-write of ODR.
    pub fn write_pin(&self, pin: u8, value: bool) {
        if pin > 15 {
            return;
        }
        let odr = self.registers.odr.get();
        if value {
            self.registers.odr.set(odr | (1 << pin));
        } else {
            self.registers.odr.set(odr & !(1 << pin));
        }
    }

    /// Replace the whole output register.
    pub fn write_port(&self, value: u16) {
        self.registers.odr.set(value as u32);
    }

    /// Invert one output pin. Silently does nothing for pin indices
    /// above 15.
    pub fn toggle_pin(&self, pin: u8) {
        if pin > 15 {
            return;
        }
        self.registers.odr.set(self.registers.odr.get() ^ (1 << pin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcc::{Rcc, RccRegisters};

    const MODER: usize = 0;
    const OTYPER: usize = 1;
    const OSPEEDR: usize = 2;
    const PUPDR: usize = 3;
    const IDR: usize = 4;
    const ODR: usize = 5;
    const AFRL: usize = 8;
    const AFRH: usize = 9;

    const AHB1ENR_WORD: usize = 0x30 / 4;
    const AHB1RSTR_WORD: usize = 0x10 / 4;

    fn with_port(id: PortId, test: impl FnOnce(&Port, *const u32, *const u32)) {
        let mut gpio_mem = [0u32; 10];
        let mut rcc_mem = [0u32; 34];
        let gpio_ptr = gpio_mem.as_mut_ptr() as *const u32;
        let rcc_ptr = rcc_mem.as_mut_ptr() as *const u32;
        let rcc = Rcc::new(unsafe { StaticRef::new(rcc_ptr as *const RccRegisters) });
        let port = Port::new(
            id,
            unsafe { StaticRef::new(gpio_ptr as *const GpioRegisters) },
            &rcc,
        );
        test(&port, gpio_ptr, rcc_ptr);
    }

    fn read_word(ptr: *const u32, word: usize) -> u32 {
        unsafe { ptr.add(word).read() }
    }

    fn write_word(ptr: *const u32, word: usize, value: u32) {
        unsafe { (ptr as *mut u32).add(word).write(value) }
    }

    fn input_config(pin: u8) -> PinConfig {
        PinConfig {
            pin_number: pin,
            mode: Mode::Input,
            output_type: OutputType::PushPull,
            speed: Speed::Low,
            pull: PullUpPullDown::NoPull,
            alternate_function: 0,
        }
    }

    #[test]
    fn configure_enables_port_clock() {
        with_port(PortId::C, |port, _, rcc_ptr| {
            port.configure(&input_config(0));
            assert_eq!(read_word(rcc_ptr, AHB1ENR_WORD), 1 << 2);
            assert!(port.is_enabled_clock());
        });
    }

    #[test]
    fn mode_bits_of_other_pins_are_untouched() {
        with_port(PortId::A, |port, gpio_ptr, _| {
            write_word(gpio_ptr, MODER, 0xFFFF_FFFF);
            port.configure(&input_config(3));
            assert_eq!(read_word(gpio_ptr, MODER), 0xFFFF_FFFF & !(0b11 << 6));
        });
    }

    #[test]
    fn alternate_function_uses_afrl_below_pin_8() {
        with_port(PortId::B, |port, gpio_ptr, _| {
            let config = PinConfig {
                pin_number: 2,
                mode: Mode::AlternateFunction,
                output_type: OutputType::PushPull,
                speed: Speed::High,
                pull: PullUpPullDown::NoPull,
                alternate_function: 5,
            };
            port.configure(&config);
            assert_eq!(read_word(gpio_ptr, AFRL), 5 << 8);
            assert_eq!(read_word(gpio_ptr, AFRH), 0);
        });
    }

    #[test]
    fn alternate_function_uses_afrh_from_pin_8() {
        with_port(PortId::B, |port, gpio_ptr, _| {
            let config = PinConfig {
                pin_number: 11,
                mode: Mode::AlternateFunction,
                output_type: OutputType::PushPull,
                speed: Speed::High,
                pull: PullUpPullDown::NoPull,
                alternate_function: 7,
            };
            port.configure(&config);
            assert_eq!(read_word(gpio_ptr, AFRH), 7 << 12);
            assert_eq!(read_word(gpio_ptr, AFRL), 0);
        });
    }

    #[test]
    fn alternate_function_value_is_truncated_to_nibble() {
        with_port(PortId::B, |port, gpio_ptr, _| {
            let config = PinConfig {
                pin_number: 0,
                mode: Mode::AlternateFunction,
                output_type: OutputType::PushPull,
                speed: Speed::Low,
                pull: PullUpPullDown::NoPull,
                alternate_function: 0x17,
            };
            port.configure(&config);
            assert_eq!(read_word(gpio_ptr, AFRL), 0x7);
        });
    }

    #[test]
    fn analog_mode_leaves_pull_field_untouched() {
        with_port(PortId::D, |port, gpio_ptr, _| {
            write_word(gpio_ptr, PUPDR, 0b01 << 10);
            let config = PinConfig {
                pin_number: 5,
                mode: Mode::Analog,
                output_type: OutputType::PushPull,
                speed: Speed::Low,
                pull: PullUpPullDown::PullDown,
                alternate_function: 0,
            };
            port.configure(&config);
            assert_eq!(read_word(gpio_ptr, PUPDR), 0b01 << 10);
        });
    }

    #[test]
    fn input_mode_leaves_speed_and_type_untouched() {
        with_port(PortId::D, |port, gpio_ptr, _| {
            write_word(gpio_ptr, OSPEEDR, 0b11 << 4);
            write_word(gpio_ptr, OTYPER, 1 << 2);
            port.configure(&input_config(2));
            assert_eq!(read_word(gpio_ptr, OSPEEDR), 0b11 << 4);
            assert_eq!(read_word(gpio_ptr, OTYPER), 1 << 2);
        });
    }

    #[test]
    fn configure_twice_is_idempotent() {
        with_port(PortId::E, |port, gpio_ptr, _| {
            let config = PinConfig {
                pin_number: 9,
                mode: Mode::Output,
                output_type: OutputType::OpenDrain,
                speed: Speed::VeryHigh,
                pull: PullUpPullDown::PullUp,
                alternate_function: 0,
            };
            port.configure(&config);
            let snapshot: [u32; 10] = core::array::from_fn(|w| read_word(gpio_ptr, w));
            port.configure(&config);
            let again: [u32; 10] = core::array::from_fn(|w| read_word(gpio_ptr, w));
            assert_eq!(snapshot, again);
        });
    }

    #[test]
    fn port_write_then_read_round_trips() {
        with_port(PortId::A, |port, gpio_ptr, _| {
            port.write_port(0xA5A5);
            // Hardware loops outputs back into IDR; mirror that here.
            write_word(gpio_ptr, IDR, read_word(gpio_ptr, ODR));
            assert_eq!(port.read_port(), 0xA5A5);
        });
    }

    #[test]
    fn pin_write_sets_only_its_bit() {
        with_port(PortId::A, |port, gpio_ptr, _| {
            write_word(gpio_ptr, ODR, 0x0F00);
            port.write_pin(0, true);
            assert_eq!(read_word(gpio_ptr, ODR), 0x0F01);
            port.write_pin(10, false);
            assert_eq!(read_word(gpio_ptr, ODR), 0x0B01);
            write_word(gpio_ptr, IDR, read_word(gpio_ptr, ODR));
            assert_eq!(port.read_pin(0), 1);
            assert_eq!(port.read_pin(10), 0);
        });
    }

    #[test]
    fn double_toggle_restores_pin() {
        with_port(PortId::F, |port, gpio_ptr, _| {
            write_word(gpio_ptr, ODR, 0x8001);
            port.toggle_pin(15);
            assert_eq!(read_word(gpio_ptr, ODR), 0x0001);
            port.toggle_pin(15);
            assert_eq!(read_word(gpio_ptr, ODR), 0x8001);
        });
    }

    #[test]
    fn out_of_range_pins_are_ignored() {
        with_port(PortId::G, |port, gpio_ptr, _| {
            write_word(gpio_ptr, ODR, 0x1234);
            write_word(gpio_ptr, IDR, 0xFFFF);
            assert_eq!(port.read_pin(16), 0);
            port.toggle_pin(16);
            port.write_pin(255, true);
            assert_eq!(read_word(gpio_ptr, ODR), 0x1234);
        });
    }

    #[test]
    fn deinit_pulses_reset_and_leaves_it_deasserted() {
        with_port(PortId::H, |port, _, rcc_ptr| {
            port.deinit();
            assert_eq!(read_word(rcc_ptr, AHB1RSTR_WORD), 0);
        });
    }
}
