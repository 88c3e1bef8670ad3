#![warn(missing_docs)]
//! Module for additional uom macros that facilitate the creation of wavelengths
/// helper macro to create the units
#[macro_export]
macro_rules! uom_unit_creator {

    ($unit:ident, $unit_type:ident, $val1:expr) => {
        $unit_type::new::<$unit>($val1)
    };
    ($unit:ident, $unit_type:ident, $( $x:expr ),*) => {
        {
            use std::vec::Vec;
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($unit_type::new::<$unit>($x));
            )*
            temp_vec
        }
    };
}
///macro to create a Length in nanometer
///
/// A single value creates a [`Length`](uom::si::f64::Length), several values a `Vec` of lengths.
#[macro_export]
macro_rules! nanometer {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::nanometer};
        $crate::uom_unit_creator![nanometer, Length, $( $x ),*]
    }};
}

#[cfg(test)]
mod test {
    use uom::si::{f64::Length, length::nanometer};
    #[test]
    fn nanometer_macro() {
        assert_eq!(nanometer!(550.0), Length::new::<nanometer>(550.0));
        assert_eq!(
            nanometer!(400.0, 700.0),
            vec![
                Length::new::<nanometer>(400.0),
                Length::new::<nanometer>(700.0)
            ]
        );
    }
}
