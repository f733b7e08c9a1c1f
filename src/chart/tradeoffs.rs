use crate::chart::{Annotation, AxisSpec, ChartSpec, EllipseRegion, SpineStyle, Spines};
use crate::core::DataPoint;
use crate::render::Color;

pub const AWSM: &str = "awsm";
pub const WASMTIME: &str = "wasmtime";
pub const AOT_COMPILERS: &str = "aot";
pub const JIT_COMPILERS: &str = "jit";
pub const INTERPRETERS: &str = "interpreters";

const SALMON: Color = Color::rgb(234.0 / 255.0, 153.0 / 255.0, 153.0 / 255.0);
const LAVENDER: Color = Color::rgb(180.0 / 255.0, 167.0 / 255.0, 214.0 / 255.0);

/// The startup-cost vs. runtime-cost illustration for WebAssembly runtimes.
///
/// Positions are hand-tuned presentation values loosely inspired by published
/// slowdown ratios (aWsm ~1.7x native, Cranelift-based Wasmtime slower to run
/// but cheaper to start). They are not derived from measurements and must not
/// be recomputed.
#[must_use]
pub fn wasm_runtime_tradeoffs() -> ChartSpec {
    let aot_x = (1.7 + 2.8) / 2.0 + 0.1;
    let jit_x = (2.7 + 8.5) / 2.0;

    ChartSpec::new(
        "Performance tradeoffs for WebAssembly implementations",
        AxisSpec::new("Runtime cost", 0.0, 12.5).with_end_arrow_at(0.5),
        AxisSpec::new("Startup cost", 0.5, 6.0).with_end_arrow_at(0.0),
    )
    .with_spines(Spines {
        left: SpineStyle::visible(2.0),
        bottom: SpineStyle::visible(2.0),
        top: SpineStyle::HIDDEN,
        right: SpineStyle::HIDDEN,
    })
    .with_annotation(
        AWSM,
        Annotation::new("aWsm\n(LLVM)", 1.7, 4.0).with_region(
            EllipseRegion::new(DataPoint::new(1.7, 4.0), 1.75, 1.0, SALMON)
                .with_sketch(1.0, 100.0, 3.0),
        ),
    )
    .with_annotation(
        WASMTIME,
        Annotation::new("Wasmtime\n(Cranelift)", 2.8, 3.0).with_region(
            EllipseRegion::new(DataPoint::new(2.8, 3.0), 1.75, 1.0, LAVENDER)
                .with_sketch(1.0, 100.0, 2.0),
        ),
    )
    .with_annotation(AOT_COMPILERS, Annotation::new("AoT compilers", aot_x, 4.75))
    .with_annotation(
        JIT_COMPILERS,
        Annotation::new("JIT compilers", jit_x, 1.5).with_region(
            EllipseRegion::new(DataPoint::new(jit_x, 1.5), 3.0, 1.0, LAVENDER)
                .with_sketch(1.0, 100.0, 3.0),
        ),
    )
    .with_annotation(
        INTERPRETERS,
        Annotation::new("Interpreters", 11.0, 1.0).with_region(
            EllipseRegion::new(DataPoint::new(11.0, 1.0), 3.0, 1.0, LAVENDER)
                .with_sketch(1.0, 100.0, 2.0),
        ),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn chart_has_five_annotations_and_four_regions() {
        let spec = wasm_runtime_tradeoffs();
        spec.validate().expect("literal chart is valid");

        let ids: Vec<&str> = spec.annotations.keys().map(String::as_str).collect();
        assert_eq!(ids, vec![AWSM, WASMTIME, AOT_COMPILERS, JIT_COMPILERS, INTERPRETERS]);
        assert_eq!(spec.region_count(), 4);
        assert!(spec.annotation(AOT_COMPILERS).expect("aot").region.is_none());
    }

    #[test]
    fn colors_match_the_authored_palette() {
        let spec = wasm_runtime_tradeoffs();
        let awsm = spec.annotation(AWSM).and_then(|a| a.region).expect("awsm region");
        assert_eq!(awsm.fill.to_hex_rgb(), "#ea9999");
        assert_eq!(awsm.fill, Color::from_hex("#ea9999").expect("hex"));

        let jit = spec.annotation(JIT_COMPILERS).and_then(|a| a.region).expect("jit region");
        assert_eq!(jit.fill.to_hex_rgb(), "#b4a7d6");
        assert_relative_eq!(jit.center.x, 5.6);
        assert_eq!(jit.center.y, 1.5);
        assert_eq!(jit.width, 3.0);
    }

    #[test]
    fn axes_hide_top_and_right_spines() {
        let spec = wasm_runtime_tradeoffs();
        assert!(!spec.spines.top.visible);
        assert!(!spec.spines.right.visible);
        assert_eq!(spec.spines.left.width_pt, 2.0);
        assert_eq!((spec.x_axis.min, spec.x_axis.max), (0.0, 12.5));
        assert_eq!((spec.y_axis.min, spec.y_axis.max), (0.5, 6.0));
    }
}
