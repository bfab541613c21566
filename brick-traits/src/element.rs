//! Element type bounds for comparison-exchange sorting.

/// Bound for element types the sweep kernels can sort.
///
/// Elements are copied in and out of array slots by many logical threads at
/// once, so they must be `Copy + Send + Sync`. Ordering only uses the strict
/// `>` comparison: equal elements are never exchanged, and values that are
/// unordered with respect to each other (e.g. `NaN`) are left in place.
pub trait SortElement: Copy + Send + Sync + PartialOrd + num_traits::Num {}

impl<T> SortElement for T where T: Copy + Send + Sync + PartialOrd + num_traits::Num {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sort_element<T: SortElement>() {}

    #[test]
    fn test_primitive_types() {
        assert_sort_element::<u8>();
        assert_sort_element::<u32>();
        assert_sort_element::<u64>();
        assert_sort_element::<i16>();
        assert_sort_element::<i32>();
        assert_sort_element::<i64>();
        assert_sort_element::<f32>();
        assert_sort_element::<f64>();
    }

    #[test]
    fn test_custom_numeric_type() {
        // Fixed-point value with two implied decimals.
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
        struct Cents(i64);

        impl std::ops::Add for Cents {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Cents(self.0 + rhs.0)
            }
        }

        impl std::ops::Sub for Cents {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Cents(self.0 - rhs.0)
            }
        }

        impl std::ops::Mul for Cents {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Cents(self.0 * rhs.0 / 100)
            }
        }

        impl std::ops::Div for Cents {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Cents(self.0 * 100 / rhs.0)
            }
        }

        impl std::ops::Rem for Cents {
            type Output = Self;
            fn rem(self, rhs: Self) -> Self {
                Cents(self.0 % rhs.0)
            }
        }

        impl num_traits::Zero for Cents {
            fn zero() -> Self {
                Cents(0)
            }
            fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }

        impl num_traits::One for Cents {
            fn one() -> Self {
                Cents(100)
            }
        }

        impl num_traits::Num for Cents {
            type FromStrRadixErr = std::num::ParseIntError;
            fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
                i64::from_str_radix(s, radix).map(Cents)
            }
        }

        assert_sort_element::<Cents>();

        let a = Cents(250);
        let b = Cents(100);
        assert!(a > b);
        assert_eq!(a * b, a);
        assert_eq!((a - b).0, 150);
        assert_eq!(<Cents as num_traits::One>::one(), b);
    }
}
