//=====================================================================
// Small helpers shared across the ACE reader and the physics layers:
// well-known ENDF MT numbers, human-readable reaction names, and the
// Z/A -> isotope name convention used in diagnostics.
//=====================================================================

use num_enum::TryFromPrimitive;

// The subset of ENDF MT numbers that get special-cased rather than
// treated as generic secondary-neutron reactions. See spec §3/§4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(usize)]
pub enum MTNumber {
    Total = 1,
    ElasticScattering = 2,
    FirstChanceFission = 19,
    SecondChanceFission = 20,
    ThirdChanceFission = 21,
    RadiativeCapture = 102,
    Fission = 18,
    FourthChanceFission = 38,
}

impl MTNumber {
    pub const CHANCE_FISSION_MTS: [usize; 4] = [19, 20, 21, 38];
}

// Returns true for MT values that represent disappearance (absorption
// without neutron re-emission): radiative capture and charged-particle
// emission, per the ACE MT conventions referenced in spec §4.4.
pub fn is_disappearance_mt(mt: usize) -> bool {
    mt == 102 || (600..=849).contains(&mt)
}

pub fn is_fission_mt(mt: usize) -> bool {
    matches!(mt, 18 | 19 | 20 | 21 | 38)
}

// (n,n') and other secondary-neutron-producing reactions that are
// neither elastic nor fission.
pub fn is_secondary_neutron_mt(mt: usize) -> bool {
    !matches!(mt, 2 | 18 | 19 | 20 | 21 | 38) && !is_disappearance_mt(mt)
}

pub fn reaction_type_from_mt(mt: usize) -> String {
    match mt {
        1 => "total".to_string(),
        2 => "elastic scattering".to_string(),
        18 => "total fission".to_string(),
        19 => "first-chance fission".to_string(),
        20 => "second-chance fission".to_string(),
        21 => "third-chance fission".to_string(),
        38 => "fourth-chance fission".to_string(),
        102 => "radiative capture".to_string(),
        50..=91 => format!("(n,n'{}) inelastic", mt - 50),
        600..=649 => format!("(n,p{}) charged particle", mt - 600),
        650..=699 => format!("(n,d{}) charged particle", mt - 650),
        700..=749 => format!("(n,t{}) charged particle", mt - 700),
        750..=799 => format!("(n,He3) charged particle"),
        800..=849 => format!("(n,alpha{}) charged particle", mt - 800),
        other => format!("MT={other}"),
    }
}

// Element symbols indexed by atomic number, used only for diagnostic
// isotope names (e.g. "U235"). Not exhaustive of the periodic table,
// only the isotopes a criticality library realistically carries.
const ELEMENT_SYMBOLS: &[&str] = &[
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf",
];

pub fn isotope_name_from_z_a(z: usize, a: usize) -> String {
    match ELEMENT_SYMBOLS.get(z) {
        Some(symbol) => format!("{symbol}{a}"),
        None => format!("Z{z}A{a}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mt_number_round_trip() {
        assert_eq!(MTNumber::try_from(2).unwrap(), MTNumber::ElasticScattering);
        assert_eq!(MTNumber::try_from(18).unwrap(), MTNumber::Fission);
        assert!(MTNumber::try_from(999).is_err());
    }

    #[test]
    fn test_is_disappearance_mt() {
        assert!(is_disappearance_mt(102));
        assert!(is_disappearance_mt(650));
        assert!(!is_disappearance_mt(2));
        assert!(!is_disappearance_mt(18));
    }

    #[test]
    fn test_is_secondary_neutron_mt() {
        assert!(is_secondary_neutron_mt(51));
        assert!(!is_secondary_neutron_mt(2));
        assert!(!is_secondary_neutron_mt(18));
        assert!(!is_secondary_neutron_mt(102));
    }

    #[test]
    fn test_isotope_name() {
        assert_eq!(isotope_name_from_z_a(92, 235), "U235");
        assert_eq!(isotope_name_from_z_a(1, 1), "H1");
    }
}
