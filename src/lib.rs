pub mod configuration;

pub mod cache {
    pub mod clock;
    pub mod ttlpolicy;
    pub mod cachestats;
    pub mod yearcache;
}

pub mod client {
    pub mod clienterror;
    pub mod apiresponse;
    pub mod holidaysource;
    pub mod holidayclient;
}

pub mod holiday {
    pub mod holiday;
}

pub mod time {
    pub mod utility;
    pub mod rangeofdates;

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod businessdaycalculator;
    }
}
