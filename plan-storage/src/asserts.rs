#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const PLANNER_ASSERT_LEVEL_DEFINITION: u8 = PLANNER_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const PLANNER_ASSERT_LEVEL_DEFINITION: u8 = PLANNER_ASSERT_MODERATE;

pub const PLANNER_ASSERT_SIMPLE: u8 = 1;
pub const PLANNER_ASSERT_MODERATE: u8 = 2;

#[macro_export]
#[doc(hidden)]
macro_rules! planner_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PLANNER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLANNER_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! planner_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PLANNER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLANNER_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! planner_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::PLANNER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLANNER_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}
