pub type Endpoint = str;

pub const STATUS: &Endpoint = "/getstatus.jsp";
pub const SYSTEM: &Endpoint = "/getsystem.jsp";
