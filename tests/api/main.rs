mod campaigns;
mod helpers;
mod send_quota;
