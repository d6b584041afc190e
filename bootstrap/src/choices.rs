/// Built-in form choice lists, overridable from configuration.

pub fn default_teachers() -> Vec<String> {
    [
        "R. Ahlrich",
        "B. Ames",
        "D. Andrews",
        "B. Barron",
        "J. Bird",
        "B. Brennan",
        "T. Brennan",
        "B. Breyette",
        "C. Caine",
        "H. Carbaugh-Keefe",
        "B. Carroll",
        "L. Carroll",
        "C. Carver",
        "M. Chavez",
        "J. Clark",
        "L. Day",
        "A. De Lucenay",
        "D. Derifield",
        "J. Dreibelbis",
        "B. Garrity",
        "K. Garrity",
        "S. Garrity",
        "N. Hart",
        "R. Heeren",
        "S. Houston",
        "C. Hughes",
        "J. Jimenez",
        "J. Kallenberg",
        "B. Langowski",
        "G. Miller",
        "A. Schmeltz",
        "P. Skirvin",
        "A. Smith",
        "B. Stiles",
        "G. Stout",
        "J. Taylor",
        "S. Taylor",
        "S. Vanlue",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_periods() -> Vec<String> {
    [
        "Advisory/STORM",
        "Period 2",
        "Period 3",
        "Period 4",
        "Period 5",
        "Period 6",
        "Period 7",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_reasons() -> Vec<String> {
    ["Restroom", "Water", "Office", "Locker", "Nurse", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
