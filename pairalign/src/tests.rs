//! End-to-end behavior of the dispatch entry point.

use crate::{pairalign, AlignMode, AlignModel, AlignParams};
use pairalign_types::{AffineGapScoreModel, AlignError, CostModel, DichotomousSubstitutionMatrix};

fn score_model() -> AffineGapScoreModel<DichotomousSubstitutionMatrix> {
    AffineGapScoreModel::simple(0, -6, 5, 3)
}

fn views(result: &crate::AlignmentResult) -> (String, String) {
    let p = result.alignment.as_ref().unwrap();
    (p.aligned_query(), p.aligned_reference())
}

#[test]
fn global_complete_match() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Global,
        b"ACGT",
        b"ACGT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 0);
    assert_eq!(views(&r), ("ACGT".into(), "ACGT".into()));
}

#[test]
fn global_single_mismatch() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Global,
        b"ACGT",
        b"AGGT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, -6);
    assert_eq!(views(&r), ("ACGT".into(), "AGGT".into()));
}

#[test]
fn global_double_insertion() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Global,
        b"ACGTTT",
        b"ACGT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, -(5 + 2 * 3));
    assert_eq!(views(&r), ("ACGTTT".into(), "ACG--T".into()));
}

#[test]
fn global_banded_equals_full() {
    let model = score_model();
    let full = pairalign(
        AlignMode::Global,
        b"ACGAAT",
        b"ACGT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    let banded = pairalign(
        AlignMode::Global,
        b"ACGAAT",
        b"ACGT",
        AlignModel::Score(&model),
        &AlignParams::banded(2, 2),
    )
    .unwrap();
    assert_eq!(banded.score, full.score);
    assert_eq!(views(&banded), views(&full));
}

#[test]
fn local_without_similarity_is_empty() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Local,
        b"AA",
        b"TTTT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 0);
    let p = r.alignment.unwrap();
    assert!(p.query.aln.is_empty());
    assert_eq!(p.aligned_query(), "");
}

#[test]
fn local_partial_match() {
    let model = AffineGapScoreModel::simple(5, -6, 5, 3);
    let r = pairalign(
        AlignMode::Local,
        b"ACGT",
        b"AACGTTT",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 20);
    assert_eq!(views(&r), ("ACGT".into(), "ACGT".into()));
    let p = r.alignment.unwrap();
    assert_eq!(p.query.first(), 2);
    assert_eq!(p.query.last(), 5);
}

#[test]
fn edit_distance_one_deletion() {
    let model = CostModel::new(DichotomousSubstitutionMatrix::new(0, 1), 1, 2);
    let r = pairalign(
        AlignMode::EditDistance,
        b"ACT",
        b"ACGT",
        AlignModel::Cost(&model),
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 2);
    assert_eq!(views(&r), ("AC-T".into(), "ACGT".into()));
}

#[test]
fn hamming_unequal_lengths_fails() {
    let r = pairalign(
        AlignMode::Hamming,
        b"ACGT",
        b"ACG",
        AlignModel::NONE,
        &AlignParams::default(),
    );
    assert!(matches!(r, Err(AlignError::LengthMismatch(4, 3))));
}

#[test]
fn zero_band_on_unequal_lengths_fails() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Global,
        b"ACGTT",
        b"ACGT",
        AlignModel::Score(&model),
        &AlignParams::banded(0, 0),
    );
    assert!(matches!(r, Err(AlignError::BandExcludesEndpoints { .. })));
}

#[test]
fn levenshtein_and_hamming_through_dispatch() {
    let r = pairalign(
        AlignMode::Levenshtein,
        b"kitten",
        b"sitting",
        AlignModel::NONE,
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 3);

    let r = pairalign(
        AlignMode::Hamming,
        b"ACGT",
        b"AGGT",
        AlignModel::NONE,
        &AlignParams::default(),
    )
    .unwrap();
    assert_eq!(r.score, 1);
    assert_eq!(r.alignment.unwrap().query.aln.cigar(), "4M");
}

#[test]
fn score_only_agrees_with_full_results() {
    let score = score_model();
    let cost = CostModel::unit();
    for (a, b) in [
        (&b"ACGTACGT"[..], &b"AGGTACT"[..]),
        (b"", b"ACG"),
        (b"TTGGGTCAATCAGCCAGTT", b"TTGGTCATCAGCCAGTTT"),
    ] {
        for mode in [AlignMode::Global, AlignMode::SemiGlobal, AlignMode::Local] {
            let full = pairalign(mode, a, b, AlignModel::Score(&score), &AlignParams::default())
                .unwrap();
            let only = pairalign(mode, a, b, AlignModel::Score(&score), &AlignParams::score_only())
                .unwrap();
            assert_eq!(only.score, full.score, "{mode:?}");
            assert!(only.is_score_only());
            assert!(!full.is_score_only());
        }
        let full = pairalign(
            AlignMode::EditDistance,
            a,
            b,
            AlignModel::Cost(&cost),
            &AlignParams::default(),
        )
        .unwrap();
        let only = pairalign(
            AlignMode::EditDistance,
            a,
            b,
            AlignModel::Cost(&cost),
            &AlignParams::score_only(),
        )
        .unwrap();
        assert_eq!(only.score, full.score);
    }
}

#[test]
fn dispatch_rejects_wrong_models() {
    let score = score_model();
    let cost = CostModel::unit();

    assert!(matches!(
        pairalign(
            AlignMode::Global,
            b"A",
            b"A",
            AlignModel::Cost(&cost),
            &AlignParams::default(),
        ),
        Err(AlignError::ModelMismatch { .. })
    ));
    assert!(matches!(
        pairalign(
            AlignMode::EditDistance,
            b"A",
            b"A",
            AlignModel::Score(&score),
            &AlignParams::default(),
        ),
        Err(AlignError::ModelMismatch { .. })
    ));
    assert!(matches!(
        pairalign(
            AlignMode::Levenshtein,
            b"A",
            b"A",
            AlignModel::Score(&score),
            &AlignParams::default(),
        ),
        Err(AlignError::ModelMismatch { .. })
    ));
}

#[test]
fn dispatch_rejects_banding_outside_global() {
    let model = score_model();
    for mode in [AlignMode::SemiGlobal, AlignMode::Local] {
        assert!(matches!(
            pairalign(
                mode,
                b"ACGT",
                b"ACGT",
                AlignModel::Score(&model),
                &AlignParams::banded(1, 1),
            ),
            Err(AlignError::UnsupportedOptions(_))
        ));
    }
}

#[test]
fn result_cigar_roundtrips() {
    let model = score_model();
    let r = pairalign(
        AlignMode::Global,
        b"AGTTTTAT",
        b"ACCGATTTTTA",
        AlignModel::Score(&model),
        &AlignParams::default(),
    )
    .unwrap();
    let aln = &r.alignment.unwrap().query.aln;
    let text = aln.cigar();
    let back = pairalign_types::Alignment::from_cigar(&text, 1, 1).unwrap();
    assert_eq!(&back, aln);
}
