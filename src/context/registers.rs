//! Context registers and register bitsets.
//!
//! ## Registers
//!
//! A fixed set of scratch integers that iterating nodes write and reader
//! nodes read: the current from/to sites, the site between them, the site,
//! level, value and player being iterated, the edge, hint and track being
//! iterated, and the pip count of the die being iterated.
//!
//! ## RegisterSet
//!
//! A bitset over `ContextRegister`. Nodes declare the registers they read
//! and write as `RegisterSet`s; `RegisterSnapshot` saves and restores
//! exactly the registers named by a set, so nested evaluation can derive
//! its save/restore from the writes declaration.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::UNDEFINED;

/// A named context register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContextRegister {
    From,
    To,
    Between,
    Site,
    Level,
    Value,
    Player,
    Edge,
    Hint,
    Track,
    Pips,
}

impl ContextRegister {
    /// Number of registers.
    pub const COUNT: usize = 11;

    /// All registers, in bit order.
    pub const ALL: [ContextRegister; Self::COUNT] = [
        ContextRegister::From,
        ContextRegister::To,
        ContextRegister::Between,
        ContextRegister::Site,
        ContextRegister::Level,
        ContextRegister::Value,
        ContextRegister::Player,
        ContextRegister::Edge,
        ContextRegister::Hint,
        ContextRegister::Track,
        ContextRegister::Pips,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// A set of context registers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterSet(u16);

impl RegisterSet {
    /// The empty set.
    pub const EMPTY: RegisterSet = RegisterSet(0);

    /// Every register.
    pub const ALL: RegisterSet = RegisterSet((1 << ContextRegister::COUNT) - 1);

    /// A set holding one register.
    #[must_use]
    pub const fn of(register: ContextRegister) -> Self {
        Self(register.bit())
    }

    /// A set holding the given registers.
    #[must_use]
    pub fn from_registers(registers: &[ContextRegister]) -> Self {
        registers.iter().fold(Self::EMPTY, |set, &r| set.with(r))
    }

    /// This set plus one register.
    #[must_use]
    pub const fn with(self, register: ContextRegister) -> Self {
        Self(self.0 | register.bit())
    }

    /// Add a register.
    pub fn insert(&mut self, register: ContextRegister) {
        self.0 |= register.bit();
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, register: ContextRegister) -> bool {
        self.0 & register.bit() != 0
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: RegisterSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Set difference.
    #[must_use]
    pub const fn without(self, other: RegisterSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Check that every register of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: RegisterSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Check emptiness.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of registers in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the registers in bit order.
    pub fn iter(self) -> impl Iterator<Item = ContextRegister> {
        ContextRegister::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl BitOr for RegisterSet {
    type Output = RegisterSet;

    fn bitor(self, rhs: RegisterSet) -> RegisterSet {
        self.union(rhs)
    }
}

impl BitOrAssign for RegisterSet {
    fn bitor_assign(&mut self, rhs: RegisterSet) {
        self.0 |= rhs.0;
    }
}

impl From<ContextRegister> for RegisterSet {
    fn from(register: ContextRegister) -> Self {
        Self::of(register)
    }
}

impl fmt::Debug for RegisterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The register file of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    values: [i32; ContextRegister::COUNT],
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            values: [UNDEFINED; ContextRegister::COUNT],
        }
    }
}

impl Registers {
    /// Read a register.
    #[must_use]
    pub fn get(&self, register: ContextRegister) -> i32 {
        self.values[register as usize]
    }

    /// Write a register.
    pub fn set(&mut self, register: ContextRegister, value: i32) {
        self.values[register as usize] = value;
    }

    /// Capture the registers named by `set`.
    #[must_use]
    pub fn snapshot(&self, set: RegisterSet) -> RegisterSnapshot {
        RegisterSnapshot {
            saved: set.iter().map(|r| (r, self.get(r))).collect(),
        }
    }

    /// Put back the registers captured in `snapshot`.
    pub fn restore(&mut self, snapshot: &RegisterSnapshot) {
        for &(register, value) in &snapshot.saved {
            self.set(register, value);
        }
    }

    /// Registers of `set` whose value differs from `snapshot`.
    #[must_use]
    pub fn changed_since(&self, snapshot: &RegisterSnapshot) -> RegisterSet {
        snapshot
            .saved
            .iter()
            .filter(|(r, v)| self.get(*r) != *v)
            .fold(RegisterSet::EMPTY, |set, (r, _)| set.with(*r))
    }
}

/// Saved values of a set of registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterSnapshot {
    saved: SmallVec<[(ContextRegister, i32); 4]>,
}

impl RegisterSnapshot {
    /// Registers covered by this snapshot.
    #[must_use]
    pub fn registers(&self) -> RegisterSet {
        self.saved.iter().fold(RegisterSet::EMPTY, |set, (r, _)| set.with(*r))
    }
}
