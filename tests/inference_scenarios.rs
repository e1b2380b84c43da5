// inference_scenarios.rs - End-to-end inference over family files

use heredity::prelude::*;
use std::io::Write;

const TOL: f64 = 1e-9;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn family_from_csv(content: &str) -> Family {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    Family::from_file(file.path()).unwrap()
}

fn assert_normalized(posteriors: &Posteriors) {
    for entry in posteriors.iter() {
        assert!(approx_eq(entry.distribution.gene_total(), 1.0, TOL), "{} gene", entry.name);
        assert!(approx_eq(entry.distribution.trait_total(), 1.0, TOL), "{} trait", entry.name);
    }
}

#[test]
fn potter_family_reference_values() {
    let family = family_from_csv("name,mother,father,trait\nHarry,Lily,James,\nJames,,,1\nLily,,,0\n");
    let posteriors = InferenceEngine::default().infer(&family).unwrap();
    assert_normalized(&posteriors);

    let harry = posteriors.get("Harry").unwrap();
    assert!(approx_eq(harry.gene(GeneCount::Two), 0.018954767818681, TOL));
    assert!(approx_eq(harry.gene(GeneCount::One), 0.693055776317440, TOL));
    assert!(approx_eq(harry.gene(GeneCount::Zero), 0.287989455863879, TOL));
    assert!(approx_eq(harry.trait_probability(true), 0.403311728378548, TOL));

    let james = posteriors.get("James").unwrap();
    assert!(approx_eq(james.gene(GeneCount::Two), 0.197568389057751, TOL));
    assert!(approx_eq(james.gene(GeneCount::One), 0.510638297872341, TOL));
    assert!(approx_eq(james.gene(GeneCount::Zero), 0.291793313069909, TOL));
    assert!(approx_eq(james.trait_probability(true), 1.0, TOL));
    assert_eq!(james.trait_probability(false), 0.0);

    let lily = posteriors.get("Lily").unwrap();
    assert!(approx_eq(lily.gene(GeneCount::Two), 0.003619067314652, TOL));
    assert!(approx_eq(lily.gene(GeneCount::One), 0.013649053872402, TOL));
    assert!(approx_eq(lily.gene(GeneCount::Zero), 0.982731878812946, TOL));
    assert_eq!(lily.trait_probability(true), 0.0);
}

#[test]
fn affected_child_shifts_parents_toward_carrying() {
    let family = family_from_csv("name,mother,father,trait\nC,M,F,1\nM,,,\nF,,,\n");
    let (posteriors, stats) = InferenceEngine::default().infer_with_stats(&family).unwrap();
    assert_normalized(&posteriors);

    // 8 trait hypotheses, half of them contradict C's observed trait
    assert_eq!(stats.admitted_hypotheses, 4);
    assert_eq!(stats.worlds_evaluated, 4 * 27);

    let child = posteriors.get("C").unwrap();
    assert!(approx_eq(child.trait_probability(true), 1.0, TOL));
    assert_eq!(child.trait_probability(false), 0.0);

    let prior = NetworkParams::default();
    for parent in ["M", "F"] {
        let d = posteriors.get(parent).unwrap();
        assert!(approx_eq(d.gene(GeneCount::Zero), 0.645018040803710, TOL));
        assert!(approx_eq(d.gene(GeneCount::One), 0.266236469397217, TOL));
        assert!(approx_eq(d.gene(GeneCount::Two), 0.088745489799072, TOL));
        assert!(d.gene(GeneCount::One) > prior.prior(GeneCount::One));
        assert!(d.gene(GeneCount::Two) > prior.prior(GeneCount::Two));
        assert!(approx_eq(d.trait_probability(true), 0.213227171639876, TOL));
    }
}

#[test]
fn unrelated_founders_do_not_influence_others() {
    let base = family_from_csv("name,mother,father,trait\nC,M,F,1\nM,,,\nF,,,0\n");
    let extended = family_from_csv(
        "name,mother,father,trait\nC,M,F,1\nM,,,\nF,,,0\nStranger,,,\nVisitor,,,\n",
    );
    let swapped = family_from_csv(
        "name,mother,father,trait\nC,M,F,1\nM,,,\nF,,,0\nVisitor,,,\nStranger,,,\n",
    );

    let engine = InferenceEngine::default();
    let base = engine.infer(&base).unwrap();
    let extended = engine.infer(&extended).unwrap();
    let swapped = engine.infer(&swapped).unwrap();

    for name in ["C", "M", "F"] {
        let a = base.get(name).unwrap();
        let b = extended.get(name).unwrap();
        let c = swapped.get(name).unwrap();
        for gene in GeneCount::ALL {
            assert!(approx_eq(a.gene(gene), b.gene(gene), 1e-12));
            assert!(approx_eq(b.gene(gene), c.gene(gene), 1e-12));
        }
        for value in [true, false] {
            assert!(approx_eq(a.trait_probability(value), b.trait_probability(value), 1e-12));
            assert!(approx_eq(b.trait_probability(value), c.trait_probability(value), 1e-12));
        }
    }

    // An evidence-free stranger keeps the unconditional prior
    let stranger = extended.get("Stranger").unwrap();
    let prior = NetworkParams::default();
    for gene in GeneCount::ALL {
        assert!(approx_eq(stranger.gene(gene), prior.prior(gene), 1e-12));
    }
}

#[test]
fn three_generations_parallel_and_repeatable() {
    let csv = "name,mother,father,trait\n\
               Arthur,,,0\n\
               Molly,,,0\n\
               Ron,Molly,Arthur,\n\
               Hermione,,,0\n\
               Rose,Hermione,Ron,1\n\
               Charlie,Molly,Arthur,0\n";
    let family = family_from_csv(csv);

    let sequential = InferenceEngine::default();
    let parallel = InferenceEngine::new(
        NetworkParams::default(),
        InferenceOptions {
            parallel: true,
            ..InferenceOptions::default()
        },
    )
    .unwrap();

    let first = sequential.infer(&family).unwrap();
    let second = sequential.infer(&family).unwrap();
    let third = parallel.infer(&family).unwrap();
    assert_eq!(first, second);
    assert_normalized(&first);

    for (a, b) in first.iter().zip(third.iter()) {
        assert_eq!(a.name, b.name);
        for gene in GeneCount::ALL {
            assert!(approx_eq(a.distribution.gene(gene), b.distribution.gene(gene), 1e-12));
        }
    }

    // Rose's trait makes her father Ron a likely carrier
    let ron = first.get("Ron").unwrap();
    let charlie = first.get("Charlie").unwrap();
    assert!(ron.gene(GeneCount::Zero) < charlie.gene(GeneCount::Zero));
}

#[test]
fn custom_tables_flow_through_engine() {
    // With no mutation, a child of two non-carriers can only have zero copies
    let params = NetworkParams::new([1.0, 0.0, 0.0], [[0.01, 0.99], [0.56, 0.44], [0.65, 0.35]], 0.0).unwrap();
    let engine = InferenceEngine::new(params, InferenceOptions::default()).unwrap();
    let family = family_from_csv("name,mother,father,trait\nKid,Mum,Dad,\nMum,,,\nDad,,,\n");
    let posteriors = engine.infer(&family).unwrap();

    let kid = posteriors.get("Kid").unwrap();
    assert!(approx_eq(kid.gene(GeneCount::Zero), 1.0, 1e-12));
    assert!(approx_eq(kid.trait_probability(true), 0.01, 1e-12));
}

#[test]
fn contradictory_evidence_is_reported() {
    let params = NetworkParams::new([1.0, 0.0, 0.0], [[0.0, 1.0], [0.5, 0.5], [0.5, 0.5]], 0.0).unwrap();
    let engine = InferenceEngine::new(params, InferenceOptions::default()).unwrap();
    let family = family_from_csv("name,mother,father,trait\nKid,Mum,Dad,1\nMum,,,\nDad,,,\n");

    let err = engine.infer(&family).unwrap_err();
    assert!(!err.is_input_error());
    assert!(err.to_string().contains("Normalization failed"));
}

#[test]
fn malformed_records_fail_before_inference() {
    let bad_inputs = [
        "name,mother,father,trait\nKid,Mum,,1\nMum,,,\n",
        "name,mother,father,trait\nKid,Mum,Dad,1\nMum,,,\n",
        "name,mother,father,trait\nKid,,,maybe\n",
        "name,mother,trait\nKid,,1\n",
    ];
    for content in bad_inputs {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let err = Family::from_file(file.path()).unwrap_err();
        assert!(err.is_input_error(), "expected input error for {:?}", content);
    }
}

#[test]
fn oversized_family_rejected_before_dry_run_completes() {
    let mut content = String::from("name,mother,father,trait\n");
    for i in 0..20 {
        content.push_str(&format!("Person{:02},,,\n", i));
    }
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = <Args as argh::FromArgs>::from_args(&["heredity"], &[path.as_str(), "--dry-run"]).unwrap();
    let validated = validate_args(&args, None).unwrap();
    let family = Family::from_file(&validated.family_path).unwrap();
    let engine = InferenceEngine::new(validated.network, validated.inference).unwrap();

    let err = engine.check_family(&family).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("family has 20 persons"));
}
