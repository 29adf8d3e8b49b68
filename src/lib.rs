// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peripheral drivers for the STM32F407xx microcontroller.
//!
//! Covers the reset and clock control block (clock gates and peripheral
//! resets), GPIO ports, the external interrupt subsystem (SYSCFG routing,
//! EXTI lines, NVIC) and SPI. Each driver owns its register block through a
//! [`static_ref::StaticRef`], so instances can be bound either to the real
//! memory-mapped addresses or, in tests, to plain memory.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod exti;
pub mod gpio;
pub mod nvic;
pub mod rcc;
pub mod spi;
pub mod static_ref;
pub mod syscfg;

/// Interface for controlling the clock gate of a single peripheral.
pub trait ClockInterface {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}
