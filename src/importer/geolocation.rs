// Approximate data-center coordinates per AWS region, "lat,long".

pub const UNKNOWN_REGION: &str = "Unknown region";

pub fn geolocation(region: &str) -> &'static str {
    match region {
        "us-east-2" => "40.3375813,-85.3089691",
        "us-east-1" => "38.8809212,-77.1845565",
        "us-west-1" => "37.757807,-122.5200005",
        "us-west-2" => "44.0316884,-125.8648088",
        "af-south-1" => "-33.9145291,18.3264237",
        "ap-east-1" => "22.3530259,113.8097542",
        "ap-south-2" => "17.4127332,78.078398",
        "ap-southeast-3" => "-6.2287349,106.2386631",
        "ap-southeast-4" => "-37.9715652,144.7235026",
        "ap-south-1" => "19.082502,72.7163771",
        "ap-northeast-3" => "34.6777115,135.4036368",
        "ap-northeast-2" => "37.5639487,126.3833576",
        "ap-southeast-1" => "1.3146649,103.5146006",
        "ap-southeast-2" => "-33.8472349,150.602339",
        "ap-northeast-1" => "35.5042974,138.4506645",
        "ca-central-1" => "53.0194946,-124.4588843",
        "ca-west-1" => "52.9399159,-106.4508639",
        "eu-central-1" => "50.1213155,8.471759",
        "eu-west-1" => "53.0136462,-17.6787131",
        "eu-west-2" => "51.528607,-0.431226",
        "eu-south-1" => "51.5285378,-0.4312275",
        "eu-west-3" => "48.8589633,2.18223",
        "eu-south-2" => "35.3445091,-17.5680782",
        "eu-north-1" => "59.3262131,17.8172496",
        "eu-central-2" => "47.377295,8.2414212",
        "il-central-1" => "32.0879976,34.7560465",
        "me-south-1" => "25.9411945,50.2579319",
        "me-central-1" => "24.0651122,44.398553",
        "sa-east-1" => "-23.6814347,-46.9249413",
        _ => UNKNOWN_REGION,
    }
}
