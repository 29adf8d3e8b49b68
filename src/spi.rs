// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serial peripheral interface (SPI1, SPI2, SPI3).

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::register_bitfields;
use tock_registers::registers::{ReadOnly, ReadWrite};

use crate::rcc;
use crate::static_ref::StaticRef;
use crate::ClockInterface;

/// Serial peripheral interface
#[repr(C)]
pub struct SpiRegisters {
    /// control register 1
    cr1: ReadWrite<u32, CR1::Register>,
    /// control register 2
    cr2: ReadWrite<u32, CR2::Register>,
    /// status register
    sr: ReadWrite<u32, SR::Register>,
    /// data register
    dr: ReadWrite<u32>,
    /// CRC polynomial register
    crcpr: ReadWrite<u32>,
    /// RX CRC register
    rxcrcr: ReadOnly<u32>,
    /// TX CRC register
    txcrcr: ReadOnly<u32>,
    /// I2S configuration register
    i2scfgr: ReadWrite<u32>,
    /// I2S prescaler register
    i2spr: ReadWrite<u32>,
}

register_bitfields![u32,
    CR1 [
        /// Bidirectional data mode enable
        BIDIMODE OFFSET(15) NUMBITS(1) [],
        /// Output enable in bidirectional mode
        BIDIOE OFFSET(14) NUMBITS(1) [],
        /// Hardware CRC calculation enable
        CRCEN OFFSET(13) NUMBITS(1) [],
        /// CRC transfer next
        CRCNEXT OFFSET(12) NUMBITS(1) [],
        /// Data frame format
        DFF OFFSET(11) NUMBITS(1) [],
        /// Receive only
        RXONLY OFFSET(10) NUMBITS(1) [],
        /// Software slave management
        SSM OFFSET(9) NUMBITS(1) [],
        /// Internal slave select
        SSI OFFSET(8) NUMBITS(1) [],
        /// Frame format
        LSBFIRST OFFSET(7) NUMBITS(1) [],
        /// SPI enable
        SPE OFFSET(6) NUMBITS(1) [],
        /// Baud rate control
        BR OFFSET(3) NUMBITS(3) [],
        /// Master selection
        MSTR OFFSET(2) NUMBITS(1) [],
        /// Clock polarity
        CPOL OFFSET(1) NUMBITS(1) [],
        /// Clock phase
        CPHA OFFSET(0) NUMBITS(1) []
    ],
    CR2 [
        /// Tx buffer empty interrupt enable
        TXEIE OFFSET(7) NUMBITS(1) [],
        /// RX buffer not empty interrupt enable
        RXNEIE OFFSET(6) NUMBITS(1) [],
        /// Error interrupt enable
        ERRIE OFFSET(5) NUMBITS(1) [],
        /// Frame format
        FRF OFFSET(4) NUMBITS(1) [],
        /// SS output enable
        SSOE OFFSET(2) NUMBITS(1) [],
        /// Tx buffer DMA enable
        TXDMAEN OFFSET(1) NUMBITS(1) [],
        /// Rx buffer DMA enable
        RXDMAEN OFFSET(0) NUMBITS(1) []
    ],
    SR [
        /// Frame format error
        FRE OFFSET(8) NUMBITS(1) [],
        /// Busy flag
        BSY OFFSET(7) NUMBITS(1) [],
        /// Overrun flag
        OVR OFFSET(6) NUMBITS(1) [],
        /// Mode fault
        MODF OFFSET(5) NUMBITS(1) [],
        /// CRC error flag
        CRCERR OFFSET(4) NUMBITS(1) [],
        /// Underrun flag
        UDR OFFSET(3) NUMBITS(1) [],
        /// Channel side
        CHSIDE OFFSET(2) NUMBITS(1) [],
        /// Transmit buffer empty
        TXE OFFSET(1) NUMBITS(1) [],
        /// Receive buffer not empty
        RXNE OFFSET(0) NUMBITS(1) []
    ]
];

pub const SPI1_BASE: StaticRef<SpiRegisters> =
    unsafe { StaticRef::new(0x4001_3000 as *const SpiRegisters) };
pub const SPI2_BASE: StaticRef<SpiRegisters> =
    unsafe { StaticRef::new(0x4000_3800 as *const SpiRegisters) };
pub const SPI3_BASE: StaticRef<SpiRegisters> =
    unsafe { StaticRef::new(0x4000_3C00 as *const SpiRegisters) };

/// Master/slave selection (MSTR field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceMode {
    Slave = 0,
    Master = 1,
}

/// Communication topology
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusMode {
    FullDuplex,
    HalfDuplex,
    SimplexReceiveOnly,
}

/// Serial clock divider off the bus clock (BR field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaudRatePrescaler {
    DivideBy2 = 0b000,
    DivideBy4 = 0b001,
    DivideBy8 = 0b010,
    DivideBy16 = 0b011,
    DivideBy32 = 0b100,
    DivideBy64 = 0b101,
    DivideBy128 = 0b110,
    DivideBy256 = 0b111,
}

/// Idle level of the serial clock (CPOL field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPolarity {
    IdleLow = 0,
    IdleHigh = 1,
}

/// Capturing clock edge (CPHA field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPhase {
    SampleLeading = 0,
    SampleTrailing = 1,
}

/// Data frame width (DFF field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSize {
    Bits8 = 0,
    Bits16 = 1,
}

/// Shift direction (LSBFIRST field encoding)
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst = 0,
    LsbFirst = 1,
}

/// Configuration descriptor for one SPI peripheral.
#[derive(Clone, Copy, Debug)]
pub struct SpiConfig {
    pub device_mode: DeviceMode,
    pub bus_mode: BusMode,
    pub baud_rate: BaudRatePrescaler,
    pub polarity: ClockPolarity,
    pub phase: ClockPhase,
    pub frame_size: FrameSize,
    pub bit_order: BitOrder,
    pub software_slave_management: bool,
    pub slave_select_output: bool,
}

pub struct SpiClock<'a>(pub rcc::PeripheralClock<'a>);

impl ClockInterface for SpiClock<'_> {
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

pub struct Spi<'a> {
    registers: StaticRef<SpiRegisters>,
    clock: SpiClock<'a>,
}

impl<'a> Spi<'a> {
    pub const fn new(registers: StaticRef<SpiRegisters>, clock: SpiClock<'a>) -> Spi<'a> {
        Spi { registers, clock }
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

    /// Program the peripheral from its configuration descriptor. The bus
    /// clock is gated on first; the peripheral itself stays disabled until
    /// [`Spi::enable`].
    pub fn configure(&self, config: &SpiConfig) {
        self.clock.enable();

        self.registers
            .cr1
            .modify(CR1::MSTR.val(config.device_mode as u32));

        match config.bus_mode {
            BusMode::FullDuplex => self
                .registers
                .cr1
                .modify(CR1::BIDIMODE::CLEAR + CR1::RXONLY::CLEAR),
            BusMode::HalfDuplex => self.registers.cr1.modify(CR1::BIDIMODE::SET),
            BusMode::SimplexReceiveOnly => self
                .registers
                .cr1
                .modify(CR1::BIDIMODE::CLEAR + CR1::RXONLY::SET),
        }

        self.registers.cr1.modify(
            CR1::BR.val(config.baud_rate as u32)
                + CR1::CPOL.val(config.polarity as u32)
                + CR1::CPHA.val(config.phase as u32)
                + CR1::DFF.val(config.frame_size as u32)
                + CR1::LSBFIRST.val(config.bit_order as u32)
                + CR1::SSM.val(config.software_slave_management as u32),
        );

        self.registers
            .cr2
            .modify(CR2::SSOE.val(config.slave_select_output as u32));
    }

    pub fn enable(&self) {
        self.registers.cr1.modify(CR1::SPE::SET);
    }

    /// Disable the peripheral once the bus is quiet: drain the transmit
    /// buffer, wait out the busy flag, then drop SPE.
    pub fn disable(&self) {
        while !self.registers.sr.is_set(SR::TXE) {}
        while self.registers.sr.is_set(SR::BSY) {}
        self.registers.cr1.modify(CR1::SPE::CLEAR);
    }

    /// Return the peripheral to its power-on state by pulsing its reset
    /// line, then gate its clock off.
    pub fn deinit(&self) {
        self.clock.0.reset();
        self.clock.disable();
    }

    pub fn is_busy(&self) -> bool {
        self.registers.sr.is_set(SR::BSY)
    }

    pub fn is_tx_buffer_empty(&self) -> bool {
        self.registers.sr.is_set(SR::TXE)
    }

    pub fn is_rx_buffer_not_empty(&self) -> bool {
        self.registers.sr.is_set(SR::RXNE)
    }

    /// Feed the transmit buffer one frame at a time, spinning on TXE. In
    /// 16-bit frame mode bytes are paired little-endian; an odd trailing
    /// byte goes out zero-padded. Returns only once the last frame has left
    /// the shift register, so chip-select can be deasserted on return.
    pub fn write_blocking(&self, data: &[u8]) {
        if self.registers.cr1.is_set(CR1::DFF) {
            for frame in data.chunks(2) {
                while !self.registers.sr.is_set(SR::TXE) {}
                let low = frame[0] as u32;
                let high = frame.get(1).map_or(0, |b| (*b as u32) << 8);
                self.registers.dr.set(high | low);
            }
        } else {
            for &byte in data {
                while !self.registers.sr.is_set(SR::TXE) {}
                self.registers.dr.set(byte as u32);
            }
        }

        while !self.registers.sr.is_set(SR::TXE) {}
        while self.registers.sr.is_set(SR::BSY) {}
    }
}
