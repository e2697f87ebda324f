/// friendly names for the track ids the telemetry source reports
const TRACK_NAMES: &[(&str, &str)] = &[
    ("ks_barcelona", "Circuit de Barcelona-Catalunya"),
    ("ks_brands_hatch", "Brands Hatch"),
    ("ks_imola", "Imola"),
    ("ks_laguna_seca", "Laguna Seca"),
    ("ks_monza66", "Monza 1966"),
    ("ks_nordschleife", "Nürburgring Nordschleife"),
    ("ks_nurburgring", "Nürburgring GP"),
    ("ks_red_bull_ring", "Red Bull Ring"),
    ("ks_silverstone", "Silverstone"),
    ("ks_vallelunga", "Vallelunga"),
    ("ks_zandvoort", "Zandvoort"),
    ("magione", "Magione"),
    ("monza", "Monza"),
    ("mugello", "Mugello"),
    ("spa", "Spa-Francorchamps"),
];

const CAR_NAMES: &[(&str, &str)] = &[
    ("abarth500", "Abarth 500 EsseEsse"),
    ("bmw_m3_e30", "BMW M3 E30"),
    ("bmw_z4_gt3", "BMW Z4 GT3"),
    ("ferrari_458_gt2", "Ferrari 458 GT2"),
    ("ks_audi_r8_lms_2016", "Audi R8 LMS 2016"),
    ("ks_ferrari_488_gt3", "Ferrari 488 GT3"),
    ("ks_lamborghini_huracan_gt3", "Lamborghini Huracán GT3"),
    ("ks_mazda_mx5_cup", "Mazda MX-5 Cup"),
    ("ks_mercedes_amg_gt3", "Mercedes-AMG GT3"),
    ("ks_porsche_911_gt3_r_2016", "Porsche 911 GT3 R 2016"),
    ("lotus_exos_125", "Lotus Exos 125"),
    ("tatuusfa1", "Tatuus FA01"),
];

fn resolve(table: &[(&str, &str)], id: &str) -> String {
    table
        .iter()
        .find(|(known_id, _)| *known_id == id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// # get the name of a track
/// unknown ids are returned as is
pub fn track_name(track_id: &str) -> String {
    resolve(TRACK_NAMES, track_id)
}

/// # get the name of a car
/// unknown ids are returned as is
pub fn car_name(car_id: &str) -> String {
    resolve(CAR_NAMES, car_id)
}
