//! End-to-end corpus: the public API against known values, reference
//! behavior, and the platform parser.

use vif::{parse_double, parse_double_range, parse_double_str};

fn assert_bits(input: &str, expected: f64) {
    let got = parse_double(input.as_bytes())
        .unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"));
    assert_eq!(
        got.to_bits(),
        expected.to_bits(),
        "input={input:?}: got {got} ({:#018x}), expected {expected} ({:#018x})",
        got.to_bits(),
        expected.to_bits(),
    );
}

#[test]
fn scenario_table() {
    assert_bits("1", 1.0);
    assert_bits("-0.5", -0.5);
    assert_bits(" +3.14159 ", 3.14159);
    assert_bits("1e308", 1e308);
    assert_bits("-Infinity", f64::NEG_INFINITY);
    assert_bits("0x1.fffffffffffffp+1023", f64::MAX);
    assert_bits("1.7976931348623157e308", f64::MAX);
    assert_bits("4.9e-324", 5e-324);
    assert!(parse_double(b"NaN").unwrap().is_nan());

    for bad in ["1..2", "", "+", "0x1.0"] {
        assert!(parse_double(bad.as_bytes()).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn boundary_table() {
    assert!(parse_double(b".").is_err());
    assert_bits(".5", 0.5);
    assert!(parse_double(b"0x").is_err());
    assert!(parse_double(b"0x.p0").is_err());
    assert_bits("0x1p0", 1.0);
    assert_bits("9999999999999999999", 1e19);
    assert_bits("2.2250738585072014E-308", f64::MIN_POSITIVE);
    assert_bits("5E-324", 5e-324);
    assert_bits("1e10000", f64::INFINITY);
    assert_bits("1e-10000", 0.0);
}

#[test]
fn whitespace_invariance() {
    for lit in ["1", "-0.5", "3.14159", "1e308", "NaN", "-Infinity", "0x1.8p1", ".5e-7"] {
        let bare = parse_double(lit.as_bytes()).map(f64::to_bits).ok();
        let padded = format!("  {lit}  ");
        assert_eq!(
            parse_double(padded.as_bytes()).map(f64::to_bits).ok(),
            bare,
            "padding changed the result of {lit:?}"
        );
    }
}

#[test]
fn sign_of_zero() {
    for neg in ["-0", "-0.0", "-0e10", "-0.0e-99", "-0x0p5"] {
        assert_eq!(
            parse_double(neg.as_bytes()).unwrap().to_bits(),
            (-0.0f64).to_bits(),
            "{neg:?} must be negative zero"
        );
    }
    for pos in ["0", "+0", "0.0", "0e10"] {
        assert_eq!(
            parse_double(pos.as_bytes()).unwrap().to_bits(),
            0,
            "{pos:?} must be positive zero"
        );
    }
}

#[test]
fn agrees_with_std_on_decimal_literals() {
    // Hand-picked awkward literals; every one must match the platform
    // parser bit for bit.
    let corpus = [
        "0.1",
        "0.2",
        "0.3",
        "2.5",
        "2.2e-7",
        "123.456e-789",
        "1e-325",
        "1e-308",
        "94.9599999999999",
        "7.2057594037927933e16",
        "35.245663",
        "0.000001",
        "1e23",
        "9e0123",
        "4503599627370495.5",
        "4503599627370497.5",
        "2251799813685248.5",
        "1.00000000000000011102230246251565404236316680908203125",
        "5708990770823839207320493820740630171355185152001e-3",
        "72057594037927928.0",
        "72057594037927936.0",
        "72057594037927932.0",
        "7205759403792793199999e-5",
        "7205759403792793200001e-5",
        "2.47032822920623272e-324",
        "6.631236871469758276785396630275967243399099947355303144249971758736286630139265439618068200788048744105960420552601852889715006376325666595539603330361800519107591783233358492337208057849499360899425128640718856616503093444922854759159988160304439909868291973931426625698663157749836252274523485312442358651207051292453083278116143932569727918709786004497872322193856150225415211997283078496319412124640111777216148110752815101775295719811974338451936095907419622417538473679495148632480391435931767981122396226829457439025654",
        "2.225073858507201136057409796709131975934819546351645648023426109724822222021076945516529523908135087914149158913039621106870086438694594645527657207407820621743379988141063267329253552286881372149012981122451451889849057222307285255133155755015914397476397983411801999323962548289017107081850690630666655994938275772572015763062690663332647565300009245888316433037779791869612049497390377829704905051080609940730262937128958950003583799967207254304360284078895771796150945516748243471030702609144621572289880258182545180325707018860872113128079512233426288368622321503775666622503982534335974568884423900265498198385487948292206806566321",
        "1.0000000000000006661338147750939242541790008544921875",
        "1090544144181609348671888949248",
        "1090544144181609348835077142190",
        "179769313486231580793728971405303415079336005420966768225677372377277375274768452815321637888100822542902092747180915963034418754259437954042542774796106818580795178497652279864636525779094386895550168925979539413120385575049068864623640636759106172025734946133617722836553783817729923424272149993943222037048308",
        "3e-32422",
        "1.23e45678",
    ];
    for lit in corpus {
        let want: f64 = lit.parse().unwrap();
        assert_bits(lit, want);
    }
}

#[test]
fn near_halfway_decimal_forms() {
    // The decimal forms of values adjacent to 2^53, whose last digit
    // decides the rounding direction.
    assert_bits("9007199254740992", 9007199254740992.0);
    assert_bits("9007199254740993", 9007199254740992.0);
    assert_bits("9007199254740993.00000000000000000000000001", 9007199254740994.0);
    assert_bits("9007199254740992.9999999999", 9007199254740992.0);
    assert_bits("9007199254740994", 9007199254740994.0);
}

#[test]
fn offset_len_addressing() {
    let buf = b"abc 1.25e2 def";
    assert_eq!(parse_double_range(buf, 3, 8).unwrap(), 125.0);
    assert_eq!(parse_double_range(buf, 4, 6).unwrap(), 125.0);
    assert!(parse_double_range(buf, 0, 14).is_err());
    assert!(parse_double_range(buf, 3, 100).is_err());
}

#[test]
fn str_and_byte_entrypoints_agree() {
    for lit in ["1.5", "-0x1.8p2", "NaN", " Infinity "] {
        let a = parse_double(lit.as_bytes()).map(f64::to_bits).ok();
        let b = parse_double_str(lit).map(f64::to_bits).ok();
        assert_eq!(a, b, "{lit:?}");
    }
}
