// THEORY:
// The `Pixel` module is the smallest unit the severity estimator looks at. It is a
// "dumb" data container for a single RGB sample plus the handful of single-pixel
// heuristics the damage scan needs. Nothing here knows about neighbors, the grid, or
// what a "brown" or "dark" pixel means; those thresholds belong to the estimator's
// configuration.
//
// Key principles:
// 1) Single-pixel scope: heuristics never read other pixels.
// 2) Exact arithmetic on the raw 0..255 channels. `sum` is an integer so threshold
//    comparisons never drift, and `mean` is derived from it.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;
    pub type Sum = u16;
    pub type Mean = f32;

    /// Number of interleaved channels in an RGB sample.
    pub const CHANNELS: usize = 3;

    /// A single RGB pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        /// Raw sum of the three channels (0..=765).
        pub fn sum(&self) -> Sum {
            self.red as Sum + self.green as Sum + self.blue as Sum
        }

        /// Mean of the three channels, the brightness proxy used for "dark" pixels.
        pub fn mean(&self) -> Mean {
            self.sum() as Mean / CHANNELS as Mean
        }
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<image::Rgb<Byte>> for Pixel {
        fn from(rgb: image::Rgb<Byte>) -> Self {
            Pixel::from(rgb.0)
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue]
        }
    }
}
