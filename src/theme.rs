pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        pub const TEXT: Color = Color::Rgb(205, 214, 244);
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);  // Subtle dim
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
    }
}
