/// Integration tests for range expressions
///
/// These tests go through the public API only: parse versions and ranges, evaluate
/// them and combine their intervals the way a dependency resolver does.
use modver_semver::{
    Bound, Dependency, DependencyKind, Operator, Version, VersionInterval, VersionParserError, VersionPredicate,
    VersionRequirement,
};

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn interval(expression: &str) -> VersionInterval {
    VersionPredicate::parse(expression).unwrap().interval().unwrap()
}

#[test]
fn test_version_ordering() {
    assert!(v("1.2.3") < v("1.2.4"));
    assert!(v("1.0.0-alpha") < v("1.0.0"));
    assert!(v("1.0.0-alpha") < v("1.0.0-alpha.1"));
    assert!(v("1.0.0-alpha.1") < v("1.0.0-alpha.beta"));
    assert!(v("1.0.0-beta.2") < v("1.0.0-beta.11"));
    assert!(v("1.0.0-rc.1") < v("1.0.0"));
    assert!(v("1.9") < v("1.10"));
    assert!(v("1.0.0.1") > v("1.0"));
}

#[test]
fn test_conjunction() {
    let predicate = VersionPredicate::parse(">=1.2.0 <2.0.0").unwrap();
    assert!(predicate.test(&v("1.9.9")));
    assert!(!predicate.test(&v("2.0.0")));
    assert_eq!(predicate.terms().len(), 2);
}

#[test]
fn test_caret_interval() {
    let caret = interval("^1.2.3");
    assert_eq!(caret.min(), Some(&v("1.2.3")));
    assert!(caret.is_min_inclusive());
    assert!(!caret.is_max_inclusive());
    assert!(caret.contains(&v("1.99.99")));
    assert!(!caret.contains(&v("2.0.0")));
    assert!(!caret.contains(&v("2.0.0-alpha")));
}

#[test]
fn test_tilde_interval() {
    let tilde = interval("~1.2.3");
    assert_eq!(tilde.min(), Some(&v("1.2.3")));
    assert!(tilde.contains(&v("1.2.99")));
    assert!(!tilde.contains(&v("1.3.0")));
    assert!(!tilde.contains(&v("1.3.0-alpha")));
}

#[test]
fn test_wildcard_interval() {
    let predicate = VersionPredicate::parse("1.2.x").unwrap();
    assert_eq!(predicate.terms()[0].operator(), Operator::SameToNextMinor);

    let wildcard = predicate.interval().unwrap();
    assert_eq!(wildcard, interval("~1.2-"));
    assert!(wildcard.contains(&v("1.2.0")));
    assert!(wildcard.contains(&v("1.2.7")));
    assert!(!wildcard.contains(&v("1.3.0")));
    assert!(!wildcard.contains(&v("1.1.99")));
}

#[test]
fn test_not_of_two_intervals() {
    let outside = VersionRequirement::parse(["<1.0.0", ">=2.0.0"]).unwrap().intervals();
    assert_eq!(outside.len(), 2);

    let inside = VersionInterval::not_all(&outside);
    assert_eq!(inside, vec![interval(">=1.0.0 <2.0.0")]);
    assert_eq!(inside[0].to_string(), "[1.0.0,2.0.0)");
}

#[test]
fn test_rejected_expressions() {
    for expression in [">=1.x", "1.x.2", "x", "1.x-rc", ">foo", "<=", "1.2.3.x"] {
        let err = VersionPredicate::parse(expression).unwrap_err();
        assert!(!err.to_string().is_empty(), "{expression}");
    }

    assert!(matches!(
        VersionPredicate::parse("^snapshot"),
        Err(VersionParserError::OpaqueOperator { .. })
    ));
}

#[test]
fn test_dependency_resolution_flow() {
    let depends = Dependency::new(
        DependencyKind::Depends,
        "fabric-api",
        VersionRequirement::parse([">=0.40.0 <0.60", "0.70.x"]).unwrap(),
    );
    let breaks = Dependency::new(
        DependencyKind::Breaks,
        "fabric-api",
        VersionRequirement::parse(["0.45.x"]).unwrap(),
    );

    let allowed = VersionInterval::and_all(&depends.allowed_intervals(), &breaks.allowed_intervals());
    let rendered: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["[0.40.0,0.45-)", "[0.46-,0.60)", "[0.70-,0.71-)"]);

    for (version, ok) in [("0.44.2", true), ("0.45.0", false), ("0.59.1", true), ("0.60.0", false), ("0.70.3", true)] {
        let version = v(version);
        assert_eq!(allowed.iter().any(|i| i.contains(&version)), ok, "{version}");
        assert_eq!(depends.matches(&version) && !breaks.matches(&version), ok, "{version}");
    }

    assert_eq!(depends.to_string(), "{depends fabric-api @ [>=0.40.0 <0.60 || 0.70.x]}");
}

#[test]
fn test_opaque_versions() {
    let requirement = VersionRequirement::parse(["1.20.x", "23w13a_or_b"]).unwrap();
    assert!(requirement.matches(&v("23w13a_or_b")));
    assert!(requirement.matches(&v("1.20.4")));
    assert!(!requirement.matches(&v("23w14a")));

    let intervals = requirement.intervals();
    assert_eq!(intervals.len(), 2);
    assert!(intervals[1].contains(&v("23w13a_or_b")));
}

#[test]
fn test_breaks_on_opaque_version() {
    let snapshot = v("23w13a");
    let breaks = Dependency::new(
        DependencyKind::Breaks,
        "minecraft",
        VersionRequirement::parse(["23w13a"]).unwrap(),
    );

    let exact = Dependency::new(
        DependencyKind::Depends,
        "minecraft",
        VersionRequirement::parse(["23w13a"]).unwrap(),
    );
    let allowed = VersionInterval::and_all(&exact.allowed_intervals(), &breaks.allowed_intervals());
    assert!(allowed.is_empty());

    let ranged = Dependency::new(
        DependencyKind::Depends,
        "minecraft",
        VersionRequirement::parse(["1.20.x", "23w13a", "23w14a"]).unwrap(),
    );
    let allowed = VersionInterval::and_all(&ranged.allowed_intervals(), &breaks.allowed_intervals());
    assert!(!allowed.iter().any(|i| i.contains(&snapshot)));
    assert!(allowed.iter().any(|i| i.contains(&v("23w14a"))));
    assert!(allowed.iter().any(|i| i.contains(&v("1.20.4"))));

    let below = VersionInterval::new(None, Some(Bound::exclusive(snapshot.clone()))).unwrap();
    let ret = VersionInterval::or(&[VersionInterval::point(snapshot.clone())], &below);
    assert_eq!(ret, vec![VersionInterval::INFINITE]);
}
