// Command line for the customizer window.

use std::path::PathBuf;

use clap::Parser;

/// Jersey customizer: tinted garment layers plus a draggable, resizable decal.
#[derive(Parser, Debug)]
#[command(
    name = "jersey-customizer",
    version,
    about = "Preview a jersey design with a movable decal",
    long_about = "Composites the garment, shoulder, stripe and neck layers named in a JSON\n\
                  design file, tints each one, and shows the result in a window.\n\
                  Drag the decal to move it, drag its edges to resize it.\n\n\
                  Keys:\n  R    reload the design file\n  Esc  quit"
)]
pub struct CliArgs {
    /// JSON design file (layer assets + colors).
    #[arg(value_name = "DESIGN.json")]
    pub design: PathBuf,

    /// Decal image; overrides the design file's "decal".
    #[arg(short, long, value_name = "IMAGE")]
    pub decal: Option<PathBuf>,

    /// Window scale factor.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub scale: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = CliArgs::try_parse_from(["jersey-customizer", "design.json"]).unwrap();
        assert_eq!(args.design, PathBuf::from("design.json"));
        assert_eq!(args.scale, 1);
        assert!(args.decal.is_none());
    }

    #[test]
    fn parses_overrides() {
        let args = CliArgs::try_parse_from(["jersey-customizer", "d.json", "--decal", "logo.png", "-s", "2"]).unwrap();
        assert_eq!(args.decal, Some(PathBuf::from("logo.png")));
        assert_eq!(args.scale, 2);
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(CliArgs::try_parse_from(["jersey-customizer", "d.json", "-s", "9"]).is_err());
        assert!(CliArgs::try_parse_from(["jersey-customizer"]).is_err());
    }
}
