//! Console rendering of a finished sweep.

use std::fmt::Write;

use es_app::SweepResponse;
use es_core::Complex64;
use nalgebra::DVector;

/// Leading amplitudes shown per eigenvector.
const SHOWN_AMPLITUDES: usize = 4;

pub fn header(model: &str, parameters: &str, knum: usize) -> String {
    format!("Model = {model}\tLs = {parameters}\tk = {knum}")
}

pub fn eigenvalue_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:.8}")).collect();
    format!("[{}]", items.join(", "))
}

pub fn amplitude(z: &Complex64) -> String {
    format!("{:.4} + {:.4}j", z.re, z.im)
}

pub fn eigenvector_line(index: usize, vector: &DVector<Complex64>) -> String {
    let shown: Vec<String> = vector.iter().take(SHOWN_AMPLITUDES).map(amplitude).collect();
    format!(
        "Eigenvector {index}: [{}] ... [{} entries total]",
        shown.join(", "),
        vector.len()
    )
}

/// Per-parameter spectra, with eigenvector previews when `vectors` is set.
pub fn spectra(response: &SweepResponse, vectors: bool) -> String {
    let mut out = String::new();
    let rows = response
        .parameters
        .iter()
        .zip(response.result.eigenvalues())
        .zip(response.result.eigenvectors());
    for ((parameter, values), eigenvectors) in rows {
        let _ = writeln!(out, "Spectrum at L = {parameter:.3}");
        let _ = writeln!(out, "\t{}", eigenvalue_list(values));
        if vectors {
            for (j, v) in eigenvectors.iter().enumerate() {
                let _ = writeln!(out, "\t{}", eigenvector_line(j, v));
            }
        }
    }
    out
}

pub fn footer(elapsed_s: f64) -> String {
    format!("Done.\nElapsed time: {elapsed_s:.3} seconds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line() {
        assert_eq!(
            header("gaussian.Gaussian1d:N=8", "5.0,20.0:20", 2),
            "Model = gaussian.Gaussian1d:N=8\tLs = 5.0,20.0:20\tk = 2"
        );
    }

    #[test]
    fn eigenvalues_use_eight_decimals() {
        assert_eq!(eigenvalue_list(&[-1.5, 0.25]), "[-1.50000000, 0.25000000]");
    }

    #[test]
    fn eigenvector_preview_is_truncated() {
        let v = DVector::from_fn(6, |i, _| Complex64::new(i as f64 * 0.5, -0.125));
        assert_eq!(
            eigenvector_line(1, &v),
            "Eigenvector 1: [0.0000 + -0.1250j, 0.5000 + -0.1250j, 1.0000 + -0.1250j, \
             1.5000 + -0.1250j] ... [6 entries total]"
        );
    }

    #[test]
    fn short_eigenvectors_are_shown_whole() {
        let v = DVector::from_element(2, Complex64::new(1.0, 0.0));
        assert_eq!(
            eigenvector_line(0, &v),
            "Eigenvector 0: [1.0000 + 0.0000j, 1.0000 + 0.0000j] ... [2 entries total]"
        );
    }

    #[test]
    fn footer_has_three_decimals() {
        assert_eq!(footer(1.23456), "Done.\nElapsed time: 1.235 seconds");
    }
}
