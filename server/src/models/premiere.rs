/// Fixed facts about the premiere screening quoted in visitor confirmations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiereDetails {
    pub film_title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub venue: &'static str,
    pub admission: &'static str,
    pub website: &'static str,
}

impl PremiereDetails {
    pub const fn screening() -> Self {
        Self {
            film_title: "Das Ende vom Tellerrand",
            date: "20. Februar 2026",
            time: "19:30 Uhr",
            venue: "Filmtheater Schauburg Dresden, Königsbrücker Straße 8, 01097 Dresden",
            admission: "Auf Spendenbasis",
            website: "www.herrlehmanns-weltreise.de",
        }
    }

    pub fn website_url(&self) -> String {
        format!("https://{}", self.website)
    }
}
