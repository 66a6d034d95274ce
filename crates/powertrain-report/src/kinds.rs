//! ---
//! pt_section: "02-reporting"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Concurrent event reporter for the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
//! Producer and consumer kinds plus fixed-arity tables keyed by them.
//!
//! Tables are plain arrays sized by the enum cardinality, so an index is
//! always in range once a raw ordinal or slice has been converted.

use std::fmt;
use std::ops::{Index, IndexMut};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::error::{ReportError, Result};
use crate::names::{CHASSIS_CONSUMER_NAMES, POWERTRAIN_PRODUCERS, POWERTRAIN_SHORT_NAMES};

/// Powertrain producer kinds, in ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum PowertrainType {
    Gas,
    Hybrid,
}

/// Consumers that mount powertrains onto chassis, in ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum ChassisConsumerType {
    Titano,
    MegaForce,
}

pub const POWERTRAIN_TYPE_COUNT: usize = <PowertrainType as EnumCount>::COUNT;
pub const CONSUMER_TYPE_COUNT: usize = <ChassisConsumerType as EnumCount>::COUNT;

/// Conversion between a kind and its ordinal position.
pub trait Ordinal: Copy + Sized + 'static {
    fn ordinal(self) -> usize;

    fn from_ordinal(ordinal: usize) -> Result<Self>;
}

impl Ordinal for PowertrainType {
    fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Result<Self> {
        PowertrainType::iter()
            .nth(ordinal)
            .ok_or(ReportError::UnknownPowertrain {
                ordinal,
                count: POWERTRAIN_TYPE_COUNT,
            })
    }
}

impl Ordinal for ChassisConsumerType {
    fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Result<Self> {
        ChassisConsumerType::iter()
            .nth(ordinal)
            .ok_or(ReportError::UnknownConsumer {
                ordinal,
                count: CONSUMER_TYPE_COUNT,
            })
    }
}

impl PowertrainType {
    /// Every kind in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Short name used in breakdowns, e.g. `GAS`.
    pub fn short_name(self) -> &'static str {
        POWERTRAIN_SHORT_NAMES[self.ordinal()]
    }

    /// Producer description, e.g. `GasEngine powertrain`.
    pub fn producer_description(self) -> &'static str {
        POWERTRAIN_PRODUCERS[self.ordinal()]
    }
}

impl ChassisConsumerType {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn display_name(self) -> &'static str {
        CHASSIS_CONSUMER_NAMES[self.ordinal()]
    }
}

impl fmt::Display for PowertrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl fmt::Display for ChassisConsumerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

macro_rules! kind_table {
    ($(#[$meta:meta])* $name:ident, $kind:ty, $count:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name<T>([T; $count]);

        impl<T> $name<T> {
            /// Build a table by evaluating `f` for each kind in declaration order.
            pub fn from_fn(mut f: impl FnMut($kind) -> T) -> Self {
                let mut kinds = <$kind>::iter();
                Self(std::array::from_fn(|_| match kinds.next() {
                    Some(kind) => f(kind),
                    None => unreachable!("enum cardinality matches table size"),
                }))
            }

            /// Entries paired with their kind, in declaration order.
            pub fn iter(&self) -> impl Iterator<Item = ($kind, &T)> + '_ {
                <$kind>::iter().zip(self.0.iter())
            }

            pub fn values(&self) -> std::slice::Iter<'_, T> {
                self.0.iter()
            }
        }

        impl<T: Copy> $name<T> {
            /// Convert a raw per-ordinal slice, rejecting the wrong arity.
            pub fn from_slice(values: &[T]) -> Result<Self> {
                let array: [T; $count] =
                    values
                        .try_into()
                        .map_err(|_| ReportError::ArityMismatch {
                            table: $label,
                            expected: $count,
                            actual: values.len(),
                        })?;
                Ok(Self(array))
            }
        }

        impl $name<u64> {
            /// Saturating sum of every entry.
            pub fn total(&self) -> u64 {
                self.0.iter().fold(0u64, |acc, value| acc.saturating_add(*value))
            }
        }

        impl<T: Default> Default for $name<T> {
            fn default() -> Self {
                Self(std::array::from_fn(|_| T::default()))
            }
        }

        impl<T> From<[T; $count]> for $name<T> {
            fn from(values: [T; $count]) -> Self {
                Self(values)
            }
        }

        impl<T> Index<$kind> for $name<T> {
            type Output = T;

            fn index(&self, kind: $kind) -> &T {
                &self.0[kind.ordinal()]
            }
        }

        impl<T> IndexMut<$kind> for $name<T> {
            fn index_mut(&mut self, kind: $kind) -> &mut T {
                &mut self.0[kind.ordinal()]
            }
        }
    };
}

kind_table!(
    /// One value per [`PowertrainType`].
    PerPowertrain,
    PowertrainType,
    POWERTRAIN_TYPE_COUNT,
    "powertrain"
);

kind_table!(
    /// One value per [`ChassisConsumerType`].
    PerConsumer,
    ChassisConsumerType,
    CONSUMER_TYPE_COUNT,
    "consumer"
);

impl PerConsumer<PerPowertrain<u64>> {
    /// Convert a raw `[consumer][type]` table, checking both dimensions.
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != CONSUMER_TYPE_COUNT {
            return Err(ReportError::ArityMismatch {
                table: "consumer",
                expected: CONSUMER_TYPE_COUNT,
                actual: rows.len(),
            });
        }
        let mut table = Self::default();
        for (consumer, row) in ChassisConsumerType::iter().zip(rows) {
            table[consumer] = PerPowertrain::from_slice(row.as_ref())?;
        }
        Ok(table)
    }
}
